use std::path::PathBuf;

use melolo_scraper::UpstreamClient;

/// Shared application state passed to all handlers.
///
/// Nothing in here is mutable; each request runs independently.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    /// Front-end assets served for any unmatched path.
    pub static_dir: Option<PathBuf>,
}
