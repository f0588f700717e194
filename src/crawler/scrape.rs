//! HTML scraping for crawl records
//!
//! Parses a fetched body into a document tree and pulls out the content
//! fields, outbound links, and hreflang alternates. The parser is lenient:
//! malformed HTML yields whatever partial tree it can.
//!
//! Everything here is synchronous; the parsed document never crosses an
//! await point.

use crate::crawler::result::{Hreflang, Link};
use crate::url::Address;
use scraper::{Html, Selector};

/// Content extracted from one page
#[derive(Debug, Clone, Default)]
pub(crate) struct ScrapedPage {
    pub title: Option<String>,
    pub h1: Option<String>,
    pub description: Option<String>,
    pub robots: Option<String>,
    pub canonical: Option<String>,
    pub links: Vec<Link>,
    pub hreflang: Vec<Hreflang>,
}

/// Scrapes a page body, resolving link targets against the request address
pub(crate) fn scrape_page(body: &str, base: &Address) -> ScrapedPage {
    let document = Html::parse_document(body);

    ScrapedPage {
        title: select_text(&document, "title"),
        h1: select_text(&document, "h1"),
        description: select_attr(&document, r#"meta[name="description"]"#, "content"),
        robots: select_attr(&document, r#"meta[name="robots"]"#, "content"),
        canonical: select_attr(&document, r#"link[rel="canonical"]"#, "href"),
        links: extract_links(&document, base),
        hreflang: extract_hreflang(&document),
    }
}

/// Text content of the first element matching the selector
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// An attribute of the first element matching the selector
fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
}

/// Produces one Link per anchor element
///
/// Targets are resolved against the request address with the fragment
/// stripped; hrefs that cannot resolve to an http(s) URL (javascript:,
/// mailto:, malformed) leave the target as `None`. The nofollow flag comes
/// from the anchor's own rel attribute, tokenized on whitespace.
fn extract_links(document: &Html, base: &Address) -> Vec<Link> {
    let Ok(selector) = Selector::parse("a") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|anchor| {
            let href = anchor.value().attr("href").unwrap_or("").trim();
            let nofollow = anchor
                .value()
                .attr("rel")
                .map(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case("nofollow")))
                .unwrap_or(false);

            Link {
                target: base.join(href),
                text: anchor.text().collect::<String>().trim().to_string(),
                nofollow,
            }
        })
        .collect()
}

/// Collects `<link rel="alternate">` references that carry an href
fn extract_hreflang(document: &Html) -> Vec<Hreflang> {
    let Ok(selector) = Selector::parse(r#"link[rel="alternate"]"#) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            Some(Hreflang {
                href: href.to_string(),
                lang: element.value().attr("hreflang").unwrap_or("").to_string(),
            })
        })
        .collect()
}
