use std::sync::LazyLock;

use melolo_core::types::SearchItem;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::card;
use crate::{UpstreamClient, UpstreamConfig};

static GRID_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".grid > div").unwrap());

/// Search the upstream. Failures are swallowed into an empty list.
pub async fn fetch_search(client: &UpstreamClient, query: &str) -> Vec<SearchItem> {
    let url = client.config().search_url(query);
    match client.get_text(&url).await {
        Ok(html) => {
            let items = parse_search(&html, client.config());
            debug!(query = %query, count = items.len(), "parsed search results");
            items
        }
        Err(e) => {
            warn!(error = %e, url = %url, "search fetch failed");
            Vec::new()
        }
    }
}

/// Extract search hits with links made absolute against the origin.
pub fn parse_search(html: &str, config: &UpstreamConfig) -> Vec<SearchItem> {
    let document = Html::parse_document(html);

    document
        .select(&GRID_ITEM)
        .filter_map(|el| {
            let (title, href) = card::title_link(el)?;
            Some(SearchItem {
                title,
                url: config.absolutize(&href),
                image: card::image(el),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grid_items() {
        let html = r#"
            <div class="grid">
              <div>
                <img src="/p/1.jpg">
                <a class="text-Title" href="/drama/1">  One </a>
              </div>
              <div>
                <img data-src="/p/2.jpg">
                <a class="text-Title" href="https://melolo.com/drama/2">Two</a>
              </div>
              <div><span>no anchor</span></div>
            </div>
        "#;
        let items = parse_search(html, &UpstreamConfig::default());
        assert_eq!(
            items,
            vec![
                SearchItem {
                    title: "One".into(),
                    url: "https://melolo.com/drama/1".into(),
                    image: Some("/p/1.jpg".into()),
                },
                SearchItem {
                    title: "Two".into(),
                    url: "https://melolo.com/drama/2".into(),
                    image: Some("/p/2.jpg".into()),
                },
            ]
        );
    }

    #[test]
    fn only_direct_children_of_grid_are_cards() {
        let html = r#"
            <div class="grid">
              <section><div><a class="text-Title" href="/nested">Nested</a></div></section>
            </div>
        "#;
        assert!(parse_search(html, &UpstreamConfig::default()).is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let html = r#"
            <div class="grid">
              <div><a class="text-Title" href="/d/1">A</a></div>
              <div><a class="text-Title" href="/d/1">A</a></div>
            </div>
        "#;
        assert_eq!(parse_search(html, &UpstreamConfig::default()).len(), 2);
    }
}
