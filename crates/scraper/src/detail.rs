//! Detail-page scraping.
//!
//! The page carries its episode list twice: as an escaped JSON array inside
//! an embedded script payload, and as flat `"episode_id":N,"url":"…"` pairs.
//! Either copy may be missing or truncated, so both are read and merged by
//! episode id.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use melolo_core::types::{DetailResult, EpisodeRef, TITLE_UNKNOWN};
use regex::Regex;
use tracing::debug;

use crate::{ScrapeError, UpstreamClient};

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>(.*?)</title>").unwrap());

static RE_EPISODE_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\"episode_list\\":(\[.*?\])"#).unwrap());

static RE_FLAT_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""episode_id":(\d+),"url":"([^"]+)""#).unwrap());

/// Fetch and parse a detail page. Errors propagate.
pub async fn fetch_detail(
    client: &UpstreamClient,
    url: &str,
) -> Result<DetailResult, ScrapeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ScrapeError::MissingUrl);
    }
    let url = client.config().absolutize(url);

    let html = client.get_text(&url).await?;
    let detail = parse_detail(&html);
    debug!(
        url = %url,
        title = %detail.title,
        episodes = detail.episodes.len(),
        "parsed detail page"
    );
    Ok(detail)
}

pub fn parse_detail(html: &str) -> DetailResult {
    DetailResult {
        title: extract_title(html),
        episodes: merge_episodes(extract_embedded_list(html), extract_flat_pairs(html)),
    }
}

/// Text of the first `<title>` up to the first `|`, trimmed.
pub fn extract_title(html: &str) -> String {
    RE_TITLE
        .captures(html)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().split('|').next())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(TITLE_UNKNOWN)
        .to_string()
}

/// Episodes from the escaped `\"episode_list\":[…]` payload.
///
/// A malformed array yields nothing. Entries missing an id or url are
/// skipped; ids may be numbers or numeric strings.
pub fn extract_embedded_list(html: &str) -> Vec<EpisodeRef> {
    let Some(raw) = RE_EPISODE_LIST.captures(html).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    let unescaped = raw.as_str().replace("\\\"", "\"");

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&unescaped) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "embedded episode_list is not valid JSON");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|ep| {
            let id = match &ep["episode_id"] {
                serde_json::Value::Number(n) => n.as_u64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }?;
            let url = ep["url"].as_str()?;
            Some(EpisodeRef::new(id, url))
        })
        .collect()
}

/// Every flat `"episode_id":N,"url":"…"` pair on the page.
pub fn extract_flat_pairs(html: &str) -> Vec<EpisodeRef> {
    RE_FLAT_PAIR
        .captures_iter(html)
        .filter_map(|c| {
            let id = c[1].parse().ok()?;
            Some(EpisodeRef::new(id, &c[2]))
        })
        .collect()
}

/// Drop escape backslashes and give protocol-relative urls a scheme.
pub fn normalize_episode_url(url: &str) -> String {
    let clean = url.replace('\\', "");
    if clean.starts_with("//") {
        format!("https:{clean}")
    } else {
        clean
    }
}

/// Merge both extractions keyed by episode id, later entries overwriting
/// earlier ones, and return them ascending by id.
pub fn merge_episodes(
    embedded: impl IntoIterator<Item = EpisodeRef>,
    flat: impl IntoIterator<Item = EpisodeRef>,
) -> Vec<EpisodeRef> {
    let mut by_id = BTreeMap::new();
    for ep in embedded.into_iter().chain(flat) {
        by_id.insert(ep.episode_id, normalize_episode_url(&ep.url));
    }
    by_id
        .into_iter()
        .map(|(episode_id, url)| EpisodeRef { episode_id, url })
        .collect()
}
