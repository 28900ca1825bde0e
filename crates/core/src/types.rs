use serde::{Deserialize, Serialize};

/// Sentinel used when a listing card carries no episode-count label.
pub const EPISODES_UNKNOWN: &str = "N/A";

/// Sentinel used when a detail page has no usable `<title>`.
pub const TITLE_UNKNOWN: &str = "unknown";

/// Operation selected by the `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Home,
    Search,
    Detail,
    Stream,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Search => "search",
            Self::Detail => "detail",
            Self::Stream => "stream",
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Self::Home),
            "search" => Some(Self::Search),
            "detail" => Some(Self::Detail),
            "stream" => Some(Self::Stream),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card from the upstream home-page feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    pub title: String,
    /// Link as found on the page; unique within one response.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub episodes: String,
}

/// A search hit. `url` is always absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub episode_id: u64,
    pub url: String,
}

impl EpisodeRef {
    pub fn new(episode_id: u64, url: impl Into<String>) -> Self {
        Self {
            episode_id,
            url: url.into(),
        }
    }
}

/// Title plus its episodes, ascending and unique by `episode_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResult {
    pub title: String,
    pub episodes: Vec<EpisodeRef>,
}
