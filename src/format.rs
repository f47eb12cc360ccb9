use log::trace;

use crate::event::{ActionPayload, CreatePayload, Event, PullRequestPayload, PushPayload};

/// Turns an event into a human readable line.
///
/// An empty string means the event should not be printed.
/// Payloads that don't have the shape expected for their
/// event type fall back to a generic message.
#[must_use]
pub fn format_event(event: &Event) -> String {
    let repo = event.repo_name();
    trace!("format_event({}, {repo})", event.kind);

    match event.kind.as_str() {
        "PushEvent" => event.payload_as::<PushPayload>().map_or_else(
            || format!("Pushed commits to {repo}"),
            |payload| match payload.commits.len() {
                1 => format!("Pushed 1 commit to {repo}"),
                n => format!("Pushed {n} commits to {repo}"),
            },
        ),
        "IssuesEvent" => {
            let action = event
                .payload_as::<ActionPayload>()
                .map(|payload| payload.action)
                .filter(|action| !action.is_empty())
                .unwrap_or_else(|| "updated".into());
            format!("{} an issue in {repo}", capitalize_verb(&action))
        }
        "IssueCommentEvent" => format!("Commented on an issue in {repo}"),
        "PullRequestEvent" => match event.payload_as::<PullRequestPayload>() {
            Some(payload) if payload.action == "closed" && payload.pull_request.merged => {
                format!("Merged a pull request in {repo}")
            }
            Some(payload) if !payload.action.is_empty() => {
                format!("{} a pull request in {repo}", capitalize_verb(&payload.action))
            }
            _ => format!("Updated a pull request in {repo}"),
        },
        "WatchEvent" => format!("Starred {repo}"),
        "ForkEvent" => format!("Forked {repo}"),
        "CreateEvent" => match event.payload_as::<CreatePayload>() {
            Some(payload) if payload.ref_type == "repository" => {
                format!("Created repository {repo}")
            }
            Some(CreatePayload {
                ref_type,
                ref_name: Some(ref_name),
            }) if !ref_name.is_empty() => {
                format!("Created {ref_type} {ref_name:?} in {repo}")
            }
            Some(payload) => format!("Created {} in {repo}", payload.ref_type),
            None => format!("Created something in {repo}"),
        },
        other if repo.is_empty() => other.to_string(),
        other => format!("{other} in {repo}"),
    }
}

/// Uppercases the first character if it is an ASCII lowercase letter.
///
/// # Examples
/// `opened` -> `Opened`
/// `123abc` -> `123abc`
#[must_use]
pub fn capitalize_verb(verb: &str) -> String {
    let mut chars = verb.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut capitalized = String::with_capacity(verb.len());
            capitalized.push(first.to_ascii_uppercase());
            capitalized.push_str(chars.as_str());
            capitalized
        }
        _ => verb.to_string(),
    }
}
