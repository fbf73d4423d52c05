//! Blocking HTTP facade over a shared async client.
//!
//! Uses async reqwest internally, driven by a small shared tokio runtime,
//! but presents a sync interface so the pipeline stays a straight line.

use std::sync::LazyLock;
use std::time::Duration;

/// Connect timeout. No read timeout is set: a stalled response stalls the caller.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("pmharvest/", env!("CARGO_PKG_VERSION"));

/// Failed request: transport error or non-2xx status
#[derive(Debug)]
pub struct HttpError {
    /// Status code, if the server answered
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(s) => write!(f, "HTTP {s}: {}", self.message),
            None => write!(f, "HTTP error: {}", self.message),
        }
    }
}

impl std::error::Error for HttpError {}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime for HTTP operations.
static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Send a request and read the whole body as text, failing on non-2xx status.
fn send_for_text(request: reqwest::RequestBuilder) -> Result<String, HttpError> {
    SHARED_RUNTIME.handle().block_on(async {
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())?;

        Ok::<_, HttpError>(response.text().await?)
    })
}

/// HTTP GET with query parameters → response body
pub fn get_text(url: &str, params: &[(&str, String)]) -> Result<String, HttpError> {
    log::debug!("GET {url}");
    send_for_text(SHARED_CLIENT.get(url).query(params))
}

/// HTTP POST with a url-encoded form body → response body
///
/// Used when parameters are too large for a query string.
pub fn post_form_text(url: &str, form: &[(&str, String)]) -> Result<String, HttpError> {
    log::debug!("POST {url}");
    send_for_text(SHARED_CLIENT.post(url).form(form))
}
