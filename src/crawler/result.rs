//! Emitted crawl records
//!
//! The field names of [`PageResult`] and its nested types are a wire
//! contract for downstream consumers and must not change.

use crate::url::Address;
use serde::Serialize;

/// Status string emitted for pages denied by robots.txt
pub(crate) const ROBOTS_BLOCKED_STATUS: &str = "Blocked by robots.txt";

/// One response header as a key/value pair
///
/// Kept as an ordered list rather than a map so header order survives
/// serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeaderPair {
    pub key: String,
    pub val: String,
}

/// An outbound link discovered on a page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Link {
    /// Resolved absolute target; `None` when the href could not be
    /// resolved to an http(s) URL
    pub target: Option<Address>,

    /// Concatenated text content of the anchor element
    pub text: String,

    /// Whether the anchor's own rel attribute contains the nofollow token
    pub nofollow: bool,
}

/// An alternate-language reference from `<link rel="alternate" hreflang=…>`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hreflang {
    pub href: String,
    pub lang: String,
}

/// The record emitted for every dispatched fetch
///
/// A fetched page carries the full response and scraped content; a
/// robots-blocked page carries only its address, depth, and the blocked
/// status, with content fields `None` and lists empty. Exactly one
/// `PageResult` is emitted per dispatched URL, and results leave the crawl
/// in non-decreasing depth order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageResult {
    /// BFS depth at which this URL was crawled (0 for seeds)
    pub depth: i32,

    pub description: Option<String>,
    pub title: Option<String>,
    pub h1: Option<String>,

    /// Content of the robots meta tag, not to be confused with robots.txt
    pub robots: Option<String>,
    pub canonical: Option<String>,

    /// Status line text, e.g. "200 OK"
    pub status: String,
    pub status_code: u16,

    /// Protocol version, e.g. "HTTP/1.1"
    pub proto: String,
    pub proto_major: u16,
    pub proto_minor: u16,

    /// Response headers, each distinct name once with its first value
    pub header: Vec<HeaderPair>,

    pub links: Vec<Link>,
    pub hreflang: Vec<Hreflang>,

    /// The address that was requested
    pub address: Address,

    /// For 3xx responses, the resolved Location target; otherwise equal to
    /// the request address
    pub resolves_to: Address,
}

impl PageResult {
    /// Builds the synthetic record for a URL denied by robots.txt
    ///
    /// No request is made for such URLs, so every response-derived field
    /// stays at its empty value.
    pub(crate) fn robots_blocked(address: Address, depth: i32) -> Self {
        Self {
            depth,
            description: None,
            title: None,
            h1: None,
            robots: None,
            canonical: None,
            status: ROBOTS_BLOCKED_STATUS.to_string(),
            status_code: 0,
            proto: String::new(),
            proto_major: 0,
            proto_minor: 0,
            header: Vec::new(),
            links: Vec::new(),
            hreflang: Vec::new(),
            resolves_to: address.clone(),
            address,
        }
    }
}
