//! Fixed upstream settings: origin and the browser-like header set the site
//! insists on.

pub const DEFAULT_ORIGIN: &str = "https://melolo.com";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Immutable upstream configuration, built once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Scheme and host, no trailing slash.
    pub origin: String,
    pub user_agent: String,
    pub accept: String,
    pub referer: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::with_origin(DEFAULT_ORIGIN)
    }
}

impl UpstreamConfig {
    /// Config pointing at another origin. The referer follows the origin.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        let origin = origin.into().trim_end_matches('/').to_string();
        let referer = format!("{origin}/");
        Self {
            origin,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            referer,
        }
    }

    pub fn home_url(&self) -> String {
        self.origin.clone()
    }

    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search?q={}", self.origin, urlencoding::encode(query))
    }

    /// Resolve a link found on an upstream page against the origin.
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if href.starts_with("//") {
            format!("https:{href}")
        } else if href.starts_with('/') {
            format!("{}{href}", self.origin)
        } else {
            format!("{}/{href}", self.origin)
        }
    }
}
