//! Pieces shared by the listing and search card parsers.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

static TITLE_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.text-Title").unwrap());
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Trimmed title text and href of a card's title anchor.
///
/// `None` when the card has no title anchor or the anchor has no link,
/// in which case the card is dropped.
pub(crate) fn title_link(card: ElementRef<'_>) -> Option<(String, String)> {
    let anchor = card.select(&TITLE_ANCHOR).next()?;
    let href = anchor.value().attr("href").filter(|h| !h.is_empty())?;
    let title = anchor.text().collect::<String>().trim().to_string();
    Some((title, href.to_string()))
}

/// `src` of the first image, falling back to the lazy-load `data-src`.
pub(crate) fn image(card: ElementRef<'_>) -> Option<String> {
    let img = card.select(&IMG).next()?;
    let attrs = img.value();
    attrs
        .attr("src")
        .filter(|s| !s.is_empty())
        .or_else(|| attrs.attr("data-src").filter(|s| !s.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn fragment(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    #[test]
    fn image_prefers_src_then_data_src() {
        let doc = fragment(r#"<div><img src="" data-src="/lazy.jpg"></div>"#);
        let div = doc.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert_eq!(image(div).as_deref(), Some("/lazy.jpg"));

        let doc = fragment(r#"<div><img src="/a.jpg" data-src="/lazy.jpg"></div>"#);
        let div = doc.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert_eq!(image(div).as_deref(), Some("/a.jpg"));
    }

    #[test]
    fn title_link_requires_href() {
        let doc = fragment(r#"<div><a class="text-Title">No link</a></div>"#);
        let div = doc.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert!(title_link(div).is_none());
    }
}
