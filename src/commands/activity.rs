use std::{
    io::{self, Write},
    time::Duration,
};

use bon::Builder;
use clap::Args;
use colored::Colorize;
use github_activity_utils::{
    constants::{
        DEFAULT_TIMEOUT_SECS, GITHUB_ACTIVITY_API_URL, GITHUB_ACTIVITY_TIMEOUT, GITHUB_API_URL,
        NO_ACTIVITY_MESSAGE,
    },
    logging::Logger,
};
use indicatif::ProgressBar;
use log::{debug, trace};
use miette::{Context, IntoDiagnostic};

use crate::{
    event::Event,
    fetch::{EventFetcher, HttpTransport},
    format::format_event,
};

use super::{GithubActivityCommand, shadow};

#[derive(Debug, Clone, Args, Builder)]
pub struct ActivityCommand {
    /// The GitHub username to show recent activity for
    #[arg()]
    #[builder(into)]
    username: String,

    /// Base URL of the GitHub REST API.
    ///
    /// Useful for GitHub Enterprise Server installs.
    #[arg(long, env = GITHUB_ACTIVITY_API_URL, default_value = GITHUB_API_URL)]
    #[builder(default = GITHUB_API_URL.to_string(), into)]
    api_url: String,

    /// Seconds to wait for the API before giving up.
    #[arg(
        long,
        env = GITHUB_ACTIVITY_TIMEOUT,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

impl GithubActivityCommand for ActivityCommand {
    fn try_run(&mut self) -> miette::Result<()> {
        debug!(
            "github-activity {} ({})",
            shadow::PKG_VERSION,
            shadow::GHA_COMMIT_HASH_SHORT
        );

        let transport = HttpTransport::builder()
            .timeout(Duration::from_secs(self.timeout))
            .build()?;
        let fetcher = EventFetcher::builder()
            .transport(transport)
            .api_url(self.api_url.as_str())
            .build();

        let progress = Logger::multi_progress().add(
            ProgressBar::new_spinner().with_message(format!(
                "Fetching activity for {}",
                self.username.bold()
            )),
        );
        progress.enable_steady_tick(Duration::from_millis(100));

        let events = fetcher.fetch_events(&self.username);

        progress.finish_and_clear();
        Logger::multi_progress().remove(&progress);

        let events = events.wrap_err_with(|| {
            format!(
                "Failed to fetch activity for {}",
                self.username.bold().italic()
            )
        })?;

        Self::render(&events, &mut io::stdout().lock()).into_diagnostic()
    }
}

impl ActivityCommand {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Writes one `- ` prefixed line per event in the order given.
    /// Events that format to an empty line are skipped.
    ///
    /// # Errors
    /// Will error if writing to `out` fails.
    pub fn render<W>(events: &[Event], out: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        if events.is_empty() {
            return writeln!(out, "{NO_ACTIVITY_MESSAGE}");
        }

        for event in events {
            let line = format_event(event);
            if line.is_empty() {
                trace!("Skipping {}", event.kind);
                continue;
            }
            writeln!(out, "- {line}")?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::event::Event;

    use super::ActivityCommand;

    fn render(events: &[Event]) -> String {
        let mut out = Vec::new();
        ActivityCommand::render(events, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn no_events() {
        assert_eq!(render(&[]), "no recent activity\n");
    }

    #[test]
    fn renders_events_in_order() {
        let events: Vec<Event> = serde_json::from_value(json!([
            {
                "type": "PushEvent",
                "repo": { "name": "octocat/hello-world" },
                "payload": { "commits": [{ "sha": "a" }, { "sha": "b" }] }
            },
            {
                "type": "CreateEvent",
                "repo": { "name": "octocat/hello-world" },
                "payload": { "ref_type": "branch", "ref": "main" }
            },
            {
                "type": "PullRequestEvent",
                "repo": { "name": "octocat/spoon-knife" },
                "payload": { "action": "closed", "pull_request": { "merged": true } }
            },
            { "type": "WatchEvent", "repo": { "name": "rust-lang/rust" }, "payload": {} },
            { "type": "MemberEvent", "repo": null }
        ]))
        .unwrap();

        assert_eq!(
            render(&events),
            concat!(
                "- Pushed 2 commits to octocat/hello-world\n",
                "- Created branch \"main\" in octocat/hello-world\n",
                "- Merged a pull request in octocat/spoon-knife\n",
                "- Starred rust-lang/rust\n",
                "- MemberEvent\n",
            )
        );
    }

    #[test]
    fn skips_empty_lines_and_keeps_order() {
        let events: Vec<Event> = serde_json::from_value(json!([
            { "type": "ForkEvent", "repo": { "name": "a/b" } },
            { "type": "" },
            { "type": null, "repo": null },
            { "type": "WatchEvent", "repo": { "name": "c/d" } }
        ]))
        .unwrap();

        assert_eq!(render(&events), "- Forked a/b\n- Starred c/d\n");
    }

    #[test]
    fn only_empty_lines_prints_nothing() {
        let events: Vec<Event> = serde_json::from_value(json!([{ "type": "" }])).unwrap();

        assert_eq!(render(&events), "");
    }

    #[test]
    fn malformed_payload_does_not_abort() {
        let events: Vec<Event> = serde_json::from_value(json!([
            { "type": "PushEvent", "repo": { "name": "a/b" }, "payload": "garbage" },
            { "type": "ForkEvent", "repo": { "name": "c/d" } }
        ]))
        .unwrap();

        assert_eq!(render(&events), "- Pushed commits to a/b\n- Forked c/d\n");
    }

    #[test]
    fn builder_defaults() {
        let command = ActivityCommand::builder().username("octocat").build();

        assert_eq!(command.username(), "octocat");
        assert_eq!(command.api_url, "https://api.github.com");
        assert_eq!(command.timeout, 10);
    }
}
