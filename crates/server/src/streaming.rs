use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use melolo_core::error::ApiError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Every proxied stream claims this type; the upstream's is ignored.
pub const STREAM_CONTENT_TYPE: &str = "video/mp4";

/// Chunks buffered between the upstream reader and the client.
const CHUNK_BUFFER: usize = 16;

/// Proxy a remote video through this server.
///
/// The body is piped chunk by chunk with no range support and no retry; an
/// upstream failure mid-transfer ends the response early.
pub async fn proxy_stream(state: &AppState, url: Option<&str>) -> Result<Response, AppError> {
    let Some(raw) = url.filter(|u| !u.is_empty()) else {
        return Ok((StatusCode::BAD_REQUEST, "No URL").into_response());
    };

    // The query extractor has already decoded once; decode again as the
    // original handler did, a no-op for singly-encoded urls.
    let video_url = urlencoding::decode(raw)
        .map_err(|e| ApiError::Internal(format!("url decode error: {e}")))?
        .into_owned();

    let upstream = state.upstream.get_stream(&video_url).await?;
    let content_length = upstream.headers().get(CONTENT_LENGTH).cloned();
    info!(url = %video_url, content_length = ?content_length, "proxying stream");

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, STREAM_CONTENT_TYPE);
    if let Some(len) = content_length {
        builder = builder.header(CONTENT_LENGTH, len);
    }

    builder
        .body(pipe_body(upstream, video_url))
        .map_err(|e| AppError::from(ApiError::Internal(format!("response build error: {e}"))))
}

/// Connect the upstream body to a response body through a bounded channel.
///
/// The reader task stops, dropping the upstream connection, as soon as the
/// client side of the channel is gone.
fn pipe_body(upstream: reqwest::Response, url: String) -> Body {
    let (tx, rx) = mpsc::channel::<Result<Bytes, std::io::Error>>(CHUNK_BUFFER);

    tokio::spawn(async move {
        let mut chunks = upstream.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    if tx.send(Ok(bytes)).await.is_err() {
                        debug!(url = %url, "client disconnected, dropping upstream");
                        return;
                    }
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "upstream stream interrupted");
                    let _ = tx.send(Err(std::io::Error::other(e))).await;
                    return;
                }
            }
        }
        debug!(url = %url, "upstream stream finished");
    });

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    });
    Body::from_stream(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn upstream_from_stream<S>(stream: S) -> reqwest::Response
    where
        S: futures::Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
    {
        reqwest::Response::from(axum::http::Response::new(reqwest::Body::wrap_stream(stream)))
    }

    #[tokio::test]
    async fn pipes_all_chunks_in_order() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"abc")),
            Ok(Bytes::from_static(b"def")),
            Ok(Bytes::from_static(b"ghi")),
        ];
        let upstream = upstream_from_stream(futures::stream::iter(chunks));

        let body = pipe_body(upstream, "test://ordered".into());
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"abcdefghi");
    }

    #[tokio::test]
    async fn upstream_error_truncates_body() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("connection reset")),
        ];
        let upstream = upstream_from_stream(futures::stream::iter(chunks));

        let body = pipe_body(upstream, "test://broken".into());
        assert!(axum::body::to_bytes(body, usize::MAX).await.is_err());
    }

    #[tokio::test]
    async fn client_disconnect_releases_upstream() {
        let (feed_tx, feed_rx) = mpsc::channel::<Result<Bytes, std::io::Error>>(1);
        let feed = futures::stream::unfold(feed_rx, |mut rx| async move {
            rx.recv().await.map(|chunk| (chunk, rx))
        });
        let body = pipe_body(upstream_from_stream(feed), "test://disconnect".into());

        drop(body);
        let _ = feed_tx.send(Ok(Bytes::from_static(b"late chunk"))).await;

        let released = tokio::time::timeout(Duration::from_secs(2), feed_tx.closed()).await;
        assert!(released.is_ok(), "upstream reader kept running after disconnect");
    }
}
