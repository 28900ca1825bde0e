use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use melolo_core::error::ApiError;
use melolo_core::types::RequestKind;
use melolo_scraper::{detail, listing, search};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/health", get(health))
        .route("/api", get(api_entry))
        .route("/api/index", get(api_entry));

    if let Some(dir) = &state.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// API entry point
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApiQuery {
    pub kind: Option<String>,
    pub query: Option<String>,
    pub url: Option<String>,
}

impl ApiQuery {
    /// Collect the known parameters. A repeated key keeps every value,
    /// comma-joined, so `type=home&type=search` selects no mode.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "type" => &mut params.kind,
                "query" => &mut params.query,
                "url" => &mut params.url,
                _ => continue,
            };
            *slot = Some(match slot.take() {
                Some(existing) => format!("{existing},{value}"),
                None => value,
            });
        }
        params
    }
}

/// GET /api?type=home|search|detail|stream
///
/// Listing and search never fail from the caller's point of view; detail
/// and stream errors surface as 500.
async fn api_entry(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let params = ApiQuery::from_pairs(pairs);
    let Some(kind) = params.kind.as_deref().and_then(RequestKind::parse) else {
        return Err(ApiError::BadRequest("Invalid params".into()).into());
    };
    debug!(kind = %kind, "api request");

    match kind {
        RequestKind::Home => {
            let items = listing::fetch_home(&state.upstream).await;
            Ok(Json(items).into_response())
        }
        RequestKind::Search => {
            let query = params.query.as_deref().unwrap_or_default();
            let items = search::fetch_search(&state.upstream, query).await;
            Ok(Json(items).into_response())
        }
        RequestKind::Detail => {
            let url = params.url.as_deref().unwrap_or_default();
            let result = detail::fetch_detail(&state.upstream, url).await?;
            Ok(Json(result).into_response())
        }
        RequestKind::Stream => {
            crate::streaming::proxy_stream(&state, params.url.as_deref()).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn single_values_are_taken_as_is() {
        let params = ApiQuery::from_pairs(pairs(&[("type", "detail"), ("url", "/drama/1")]));
        assert_eq!(params.kind.as_deref(), Some("detail"));
        assert_eq!(params.url.as_deref(), Some("/drama/1"));
        assert!(params.query.is_none());
    }

    #[test]
    fn repeated_keys_are_joined() {
        let params = ApiQuery::from_pairs(pairs(&[
            ("type", "home"),
            ("type", "search"),
            ("url", "/a"),
            ("url", "/b"),
        ]));
        assert_eq!(params.kind.as_deref(), Some("home,search"));
        assert_eq!(params.kind.as_deref().and_then(RequestKind::parse), None);
        assert_eq!(params.url.as_deref(), Some("/a,/b"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = ApiQuery::from_pairs(pairs(&[("page", "2"), ("type", "home")]));
        assert_eq!(params.kind.as_deref(), Some("home"));
    }
}
