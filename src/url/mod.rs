//! URL handling module for sitewalk
//!
//! This module provides the canonical [`Address`] representation used
//! throughout the crawler and the include/exclude [`UrlFilter`].

mod address;
mod filter;

pub use address::Address;
pub use filter::UrlFilter;
