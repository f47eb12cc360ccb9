use std::path::PathBuf;

use clap::{Parser, crate_authors, error::ErrorKind};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use github_activity_utils::constants::GITHUB_ACTIVITY_LOG_OUT;
use log::error;

pub mod activity;

pub trait GithubActivityCommand {
    /// Runs the command and returns a result
    /// of the execution
    ///
    /// # Errors
    /// Can return a `miette` Error
    fn try_run(&mut self) -> miette::Result<()>;

    /// Runs the command and exits if there is an error.
    fn run(&mut self) {
        if let Err(e) = self.try_run() {
            error!("{e:?}");
            std::process::exit(1);
        }
    }
}

shadow_rs::shadow!(shadow);

#[derive(Parser, Debug)]
#[clap(
    name = "github-activity",
    about,
    long_about = None,
    author=crate_authors!(),
    version=shadow::PKG_VERSION,
    long_version=shadow::CLAP_LONG_VERSION,
)]
pub struct GithubActivityArgs {
    #[clap(flatten)]
    pub command: activity::ActivityCommand,

    /// Directory to write rolling log files to.
    #[arg(long, env = GITHUB_ACTIVITY_LOG_OUT)]
    pub log_out: Option<PathBuf>,

    #[clap(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

impl GithubActivityArgs {
    /// Parses the command line arguments.
    ///
    /// Help and version output exit successfully, any
    /// other parse failure prints usage and exits with 1.
    #[must_use]
    pub fn parse_or_exit() -> Self {
        Self::try_parse().unwrap_or_else(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // Nothing more can be reported if stderr is gone.
                let _ = e.print();
                std::process::exit(1);
            }
        })
    }
}
