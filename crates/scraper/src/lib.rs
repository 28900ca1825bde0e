//! Scrapers for the upstream drama site.
//!
//! Every fetcher takes an [`UpstreamClient`], which owns the immutable
//! [`UpstreamConfig`]. HTML/text extraction lives in pure functions next to
//! each fetcher so it can be tested without network access.

mod card;
pub mod client;
pub mod config;
pub mod detail;
pub mod listing;
pub mod search;

use thiserror::Error;

pub use client::UpstreamClient;
pub use config::UpstreamConfig;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("no url given")]
    MissingUrl,
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Network(e.to_string()),
        }
    }
}
