use bon::Builder;
use github_activity_utils::constants::GITHUB_API_URL;
use log::{debug, trace};
use reqwest::StatusCode;

use crate::event::Event;

mod error;
mod transport;

pub use error::*;
pub use transport::*;

/// Retrieves the first page of a user's public events.
#[derive(Debug, Builder)]
pub struct EventFetcher<T: Transport> {
    transport: T,

    /// Base URL of the GitHub REST API.
    #[builder(default = GITHUB_API_URL.to_string(), into)]
    api_url: String,
}

impl<T: Transport> EventFetcher<T> {
    /// The events endpoint for `username`. The username
    /// is interpolated as given without any escaping.
    #[must_use]
    pub fn events_url(&self, username: &str) -> String {
        format!(
            "{}/users/{username}/events",
            self.api_url.trim_end_matches('/')
        )
    }

    /// Fetches the events for `username` in the order the API returns them.
    ///
    /// # Errors
    /// Will error if the request fails, the API responds with a
    /// non-200 status, or the body isn't a JSON array of events.
    pub fn fetch_events(&self, username: &str) -> Result<Vec<Event>, FetchError> {
        let url = self.events_url(username);
        trace!("fetch_events({username})");

        let response = self.transport.get(&url)?;
        debug!("Response status: {}", response.status);

        match response.status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(FetchError::NotFound {
                    username: username.to_string(),
                });
            }
            StatusCode::FORBIDDEN => {
                return Err(FetchError::Forbidden {
                    body: response.body,
                });
            }
            status => {
                return Err(FetchError::Api {
                    status,
                    body: response.body,
                });
            }
        }

        let events: Vec<Event> = serde_json::from_str(&response.body)?;
        debug!("Decoded {} events", events.len());

        Ok(events)
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use reqwest::StatusCode;
    use rstest::rstest;

    use super::{EventFetcher, FetchError, RawResponse, Transport};

    struct StubTransport {
        status: StatusCode,
        body: &'static str,
        requested: RefCell<Vec<String>>,
    }

    impl StubTransport {
        fn new(status: StatusCode, body: &'static str) -> Self {
            Self {
                status,
                body,
                requested: RefCell::default(),
            }
        }
    }

    impl Transport for StubTransport {
        fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            Ok(RawResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    fn fetcher(status: StatusCode, body: &'static str) -> EventFetcher<StubTransport> {
        EventFetcher::builder()
            .transport(StubTransport::new(status, body))
            .build()
    }

    #[rstest]
    #[case::default_api("https://api.github.com", "https://api.github.com/users/octocat/events")]
    #[case::trailing_slash("http://localhost:8080/", "http://localhost:8080/users/octocat/events")]
    #[case::enterprise(
        "https://github.example.com/api/v3",
        "https://github.example.com/api/v3/users/octocat/events"
    )]
    fn builds_events_url(#[case] api_url: &str, #[case] expected: &str) {
        let fetcher = EventFetcher::builder()
            .transport(StubTransport::new(StatusCode::OK, "[]"))
            .api_url(api_url)
            .build();

        assert_eq!(fetcher.events_url("octocat"), expected);
    }

    #[test]
    fn decodes_events_in_order() {
        let fetcher = fetcher(
            StatusCode::OK,
            r#"[
                {"type": "PushEvent", "repo": {"name": "a/one"}, "payload": {"commits": []}},
                {"type": "WatchEvent", "repo": {"name": "b/two"}, "payload": {"action": "started"}},
                {"type": "ForkEvent", "repo": {"name": "c/three"}, "payload": {}}
            ]"#,
        );

        let events = fetcher.fetch_events("octocat").unwrap();

        let kinds = events.iter().map(|e| e.kind.as_str()).collect::<Vec<_>>();
        let repos = events.iter().map(|e| e.repo_name()).collect::<Vec<_>>();
        assert_eq!(kinds, ["PushEvent", "WatchEvent", "ForkEvent"]);
        assert_eq!(repos, ["a/one", "b/two", "c/three"]);
    }

    #[test]
    fn sends_exactly_one_request() {
        let fetcher = fetcher(StatusCode::OK, "[]");

        let events = fetcher.fetch_events("octocat").unwrap();

        assert!(events.is_empty());
        assert_eq!(
            *fetcher.transport.requested.borrow(),
            ["https://api.github.com/users/octocat/events"]
        );
    }

    #[test]
    fn not_found_references_username() {
        let err = fetcher(StatusCode::NOT_FOUND, r#"{"message": "Not Found"}"#)
            .fetch_events("no-such-user")
            .unwrap_err();

        assert!(matches!(&err, FetchError::NotFound { username } if username == "no-such-user"));
        assert!(err.to_string().contains("no-such-user"));
    }

    #[test]
    fn forbidden_includes_body() {
        let body = r#"{"message": "API rate limit exceeded"}"#;
        let err = fetcher(StatusCode::FORBIDDEN, body)
            .fetch_events("octocat")
            .unwrap_err();

        assert!(matches!(&err, FetchError::Forbidden { body: b } if b == body));
        assert!(err.to_string().contains("API rate limit exceeded"));
    }

    #[rstest]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::unavailable(StatusCode::SERVICE_UNAVAILABLE)]
    #[case::no_content(StatusCode::NO_CONTENT)]
    #[case::unauthorized(StatusCode::UNAUTHORIZED)]
    fn other_status_is_api_error(#[case] status: StatusCode) {
        let err = fetcher(status, "oops").fetch_events("octocat").unwrap_err();

        assert!(matches!(&err, FetchError::Api { status: s, body } if *s == status && body == "oops"));
    }

    #[test]
    fn untagged_events_do_not_fail_the_feed() {
        let fetcher = fetcher(
            StatusCode::OK,
            r#"[{"type": "ForkEvent", "repo": {"name": "a/b"}}, {"repo": {"name": "c/d"}}, {"type": null}]"#,
        );

        let events = fetcher.fetch_events("octocat").unwrap();

        let kinds = events.iter().map(|e| e.kind.as_str()).collect::<Vec<_>>();
        assert_eq!(kinds, ["ForkEvent", "", ""]);
    }

    #[rstest]
    #[case::not_json("<html></html>")]
    #[case::object(r#"{"message": "hi"}"#)]
    #[case::truncated(r#"[{"type": "PushEvent""#)]
    #[case::not_an_event(r#"[42]"#)]
    fn malformed_body_is_decode_error(#[case] body: &'static str) {
        let err = fetcher(StatusCode::OK, body)
            .fetch_events("octocat")
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }
}
