use std::{sync::LazyLock, time::Duration};

use bon::bon;
use github_activity_utils::constants::{DEFAULT_TIMEOUT_SECS, GITHUB_JSON_MEDIA_TYPE, USER_AGENT};
use log::{debug, trace};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use tokio::runtime::Runtime;

use super::FetchError;

static ASYNC_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Should build async runtime")
});

/// The status and body of a completed GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Performs a single GET request.
///
/// This is the only place the network is touched, which lets
/// tests hand canned responses to the fetcher.
pub trait Transport {
    /// Sends a GET request to `url` and reads the whole body.
    ///
    /// # Errors
    /// Will error if no response could be obtained.
    fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

#[bon]
impl HttpTransport {
    #[builder]
    pub fn new(
        /// Total time allowed for the request, body included.
        #[builder(default = Duration::from_secs(DEFAULT_TIMEOUT_SECS))]
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON_MEDIA_TYPE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Transport {
                url: String::new(),
                source,
            })?;
        trace!("Built HTTP client with timeout {timeout:?}");

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let transport_err = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        debug!("GET {url}");
        ASYNC_RUNTIME.block_on(async {
            let response = self.client.get(url).send().await.map_err(transport_err)?;
            let status = response.status();
            let body = response.text().await.map_err(transport_err)?;
            trace!("{url} responded with {status}, {} bytes", body.len());

            Ok::<_, FetchError>(RawResponse { status, body })
        })
    }
}
