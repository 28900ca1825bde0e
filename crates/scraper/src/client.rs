use std::sync::Arc;

use reqwest::header::{ACCEPT, REFERER, USER_AGENT};
use tracing::debug;

use crate::{ScrapeError, UpstreamConfig};

/// HTTP client that always presents the upstream's expected header set.
///
/// No request timeout is configured; an unresponsive upstream holds the
/// request open.
#[derive(Clone)]
pub struct UpstreamClient {
    config: Arc<UpstreamConfig>,
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(USER_AGENT, self.config.user_agent.as_str())
            .header(ACCEPT, self.config.accept.as_str())
            .header(REFERER, self.config.referer.as_str())
    }

    /// Fetch a page body as text. Non-2xx statuses are errors.
    pub async fn get_text(&self, url: &str) -> Result<String, ScrapeError> {
        debug!(url = %url, "upstream page request");
        let resp = self.request(url).send().await?.error_for_status()?;
        resp.text()
            .await
            .map_err(|e| ScrapeError::Network(e.to_string()))
    }

    /// Open a response whose body is left unread for streaming.
    pub async fn get_stream(&self, url: &str) -> Result<reqwest::Response, ScrapeError> {
        debug!(url = %url, "upstream stream request");
        let resp = self.request(url).send().await?.error_for_status()?;
        Ok(resp)
    }
}
