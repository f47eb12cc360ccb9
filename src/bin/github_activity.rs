use github_activity::commands::{GithubActivityArgs, GithubActivityCommand};
use github_activity_utils::logging::Logger;
use log::LevelFilter;

fn main() {
    let mut args = GithubActivityArgs::parse_or_exit();

    Logger::new()
        .filter_level(args.verbosity.log_level_filter())
        .filter_modules([
            ("hyper", LevelFilter::Info),
            ("reqwest", LevelFilter::Info),
            ("rustls", LevelFilter::Info),
        ])
        .log_out_dir(args.log_out.clone())
        .init();

    log::trace!("Parsed arguments: {args:#?}");

    args.command.run();
}
