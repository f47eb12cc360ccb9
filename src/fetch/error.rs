use colored::Colorize;
use miette::Diagnostic;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum FetchError {
    #[error("User {} not found", .username.bold().italic())]
    #[diagnostic(
        code(github_activity::not_found),
        help("Check the spelling of the username")
    )]
    NotFound { username: String },

    #[error("Forbidden (403), response: {body}")]
    #[diagnostic(
        code(github_activity::forbidden),
        help("Anonymous requests are rate limited by GitHub, try again later")
    )]
    Forbidden { body: String },

    #[error("GitHub API error {status}, response: {body}")]
    #[diagnostic(code(github_activity::api))]
    Api { status: StatusCode, body: String },

    #[error("Request to {url} failed")]
    #[diagnostic(code(github_activity::transport))]
    Transport {
        url: String,

        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid JSON in response")]
    #[diagnostic(code(github_activity::decode))]
    Decode(#[from] serde_json::Error),
}
