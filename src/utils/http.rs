//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Default user agent, `book-finder/<version>`
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Options for building an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,

    /// Whole-request timeout; `None` lets a request wait indefinitely
    pub timeout: Option<Duration>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Shared HTTP client
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a client with default options (no request timeout)
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_options(&HttpOptions::default())
    }

    /// Create a client from explicit options
    pub fn with_options(options: &HttpOptions) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .user_agent(options.user_agent.as_str())
            .pool_idle_timeout(Duration::from_secs(90));

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
        })
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
