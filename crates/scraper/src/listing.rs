use std::collections::HashSet;
use std::sync::LazyLock;

use melolo_core::types::{EPISODES_UNKNOWN, ListingItem};
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::UpstreamClient;
use crate::card;

static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.bg-white.rounded-xl, div.min-w-45").unwrap());
static EPISODE_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".text-slate-500").unwrap());

/// Fetch the home-page feed.
///
/// Any failure yields an empty list; callers cannot tell an unreachable
/// upstream from an empty feed.
pub async fn fetch_home(client: &UpstreamClient) -> Vec<ListingItem> {
    let url = client.config().home_url();
    match client.get_text(&url).await {
        Ok(html) => {
            let items = parse_listing(&html);
            debug!(count = items.len(), "parsed home listing");
            items
        }
        Err(e) => {
            warn!(error = %e, url = %url, "home listing fetch failed");
            Vec::new()
        }
    }
}

/// Extract listing cards, one per distinct url, in first-seen order.
pub fn parse_listing(html: &str) -> Vec<ListingItem> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for el in document.select(&CARD) {
        let Some((title, url)) = card::title_link(el) else {
            continue;
        };
        if !seen.insert(url.clone()) {
            continue;
        }

        let episodes = el
            .select(&EPISODE_LABEL)
            .next()
            .map(|label| label.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| EPISODES_UNKNOWN.to_string());

        items.push(ListingItem {
            title,
            url,
            image: card::image(el),
            episodes,
        });
    }

    items
}
