use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use bon::Builder;
use chrono::Local;
use colored::{ColoredString, Colorize};
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::{Level, LevelFilter, Record};
use log4rs::{
    Config, Logger as L4RSLogger,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root},
    encode::{Encode, Write, pattern::PatternEncoder},
};

static MULTI_PROGRESS: LazyLock<MultiProgress> = LazyLock::new(MultiProgress::new);

#[derive(Debug, Clone)]
pub struct Logger {
    modules: Vec<(String, LevelFilter)>,
    level: LevelFilter,
    log_dir: Option<PathBuf>,
}

impl Logger {
    const TRIGGER_FILE_SIZE: u64 = 10 * 1024;
    const ARCHIVE_FILENAME_PATTERN: &'static str = "github-activity.{}.log";
    const LOG_FILENAME: &'static str = "github-activity.log";
    const LOG_FILE_COUNT: u32 = 4;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_modules<I, S>(&mut self, filter_modules: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, LevelFilter)>,
        S: AsRef<str>,
    {
        self.modules = filter_modules
            .into_iter()
            .map(|(module, level)| (module.as_ref().to_string(), level))
            .collect::<Vec<_>>();
        self
    }

    pub const fn filter_level(&mut self, filter_level: LevelFilter) -> &mut Self {
        self.level = filter_level;
        self
    }

    /// Enables rolling file logs in the given directory.
    /// Without a directory only stderr is written to.
    pub fn log_out_dir<P>(&mut self, path: Option<P>) -> &mut Self
    where
        P: AsRef<Path>,
    {
        self.log_dir = path.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Initializes logging for the application.
    ///
    /// # Panics
    /// Will panic if logging is unable to be initialized.
    pub fn init(&self) {
        let stderr = ConsoleAppender::builder()
            .encoder(Box::new(
                CustomPatternEncoder::builder()
                    .filter_modules(self.modules.clone())
                    .build(),
            ))
            .target(Target::Stderr)
            .build();

        let config =
            Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
        let mut root = Root::builder().appender("stderr");

        let config = match self.log_dir.as_deref().map(Self::file_appender) {
            None => config,
            Some(Err(e)) => {
                eprintln!("Cannot create logs directory:\n{e}");
                config
            }
            Some(Ok(file_appender)) => {
                root = root.appender("file");
                config.appender(Appender::builder().build("file", Box::new(file_appender)))
            }
        }
        .build(root.build(self.level))
        .expect("Logger config should build");

        let logger = L4RSLogger::new(config);

        LogWrapper::new(MULTI_PROGRESS.clone(), logger)
            .try_init()
            .expect("LogWrapper should initialize");
        log::set_max_level(self.level);
    }

    fn file_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
        let log_out_path = log_dir.join(Self::LOG_FILENAME);
        let log_archive_pattern =
            format!("{}/{}", log_dir.display(), Self::ARCHIVE_FILENAME_PATTERN);

        let window_roller =
            FixedWindowRoller::builder().build(&log_archive_pattern, Self::LOG_FILE_COUNT)?;

        Ok(RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} - {l} - {M} - {m}{n}")))
            .build(
                log_out_path,
                Box::new(CompoundPolicy::new(
                    Box::new(SizeTrigger::new(Self::TRIGGER_FILE_SIZE)),
                    Box::new(window_roller),
                )),
            )?)
    }

    /// The progress handle that log lines are routed through so
    /// that spinners aren't torn apart by log output.
    pub fn multi_progress() -> MultiProgress {
        MULTI_PROGRESS.clone()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            modules: vec![],
            level: LevelFilter::Warn,
            log_dir: None,
        }
    }
}

trait ColoredLevel {
    fn colored(&self) -> ColoredString;
}

impl ColoredLevel for Level {
    fn colored(&self) -> ColoredString {
        match self {
            Self::Error => Self::Error.as_str().red(),
            Self::Warn => Self::Warn.as_str().yellow(),
            Self::Info => Self::Info.as_str().green(),
            Self::Debug => Self::Debug.as_str().blue(),
            Self::Trace => Self::Trace.as_str().cyan(),
        }
    }
}

#[derive(Debug, Builder)]
struct CustomPatternEncoder {
    #[builder(default, into)]
    filter_modules: Vec<(String, LevelFilter)>,
}

impl CustomPatternEncoder {
    fn is_filtered(&self, record: &Record) -> bool {
        record.module_path().is_some_and(|mp| {
            self.filter_modules
                .iter()
                .any(|(module, level)| mp.contains(module.as_str()) && *level < record.level())
        })
    }
}

impl Encode for CustomPatternEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        if self.is_filtered(record) {
            return Ok(());
        }

        match log_header(record, log::max_level()) {
            Some(header) => Ok(writeln!(w, "{header} {args}", args = record.args())?),
            None => Ok(()),
        }
    }
}

/// Builds the prefix for a log line. Debug and trace add a
/// timestamp, trace also adds the source location.
fn log_header(record: &Record, max_level: LevelFilter) -> Option<String> {
    const WIDTH: usize = 5;
    let level = record.level().colored();
    let sep = "=>".bold();

    match max_level {
        LevelFilter::Off => None,
        LevelFilter::Error | LevelFilter::Warn | LevelFilter::Info => {
            Some(format!("{level:WIDTH$} {sep}"))
        }
        LevelFilter::Debug => Some(format!(
            "[{time} {level:>WIDTH$}] {sep}",
            time = Local::now().format("%H:%M:%S"),
        )),
        LevelFilter::Trace => Some(format!(
            "[{time} {level:WIDTH$} {module}:{line}] {sep}",
            time = Local::now().format("%H:%M:%S"),
            module = record.module_path().unwrap_or_default().bright_yellow(),
            line = record
                .line()
                .map_or_else(String::new, |l| l.to_string())
                .bright_green(),
        )),
    }
}
