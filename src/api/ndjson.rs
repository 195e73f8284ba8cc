use std::convert::Infallible;
use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;
use crate::models::LogEntry;
use tracing::warn;

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// One JSON object terminated by `\n`.
pub fn encode_line(entry: &LogEntry) -> Option<Bytes> {
    match serde_json::to_vec(entry) {
        Ok(mut line) => {
            line.push(b'\n');
            Some(Bytes::from(line))
        }
        Err(e) => {
            warn!(error = %e, "Dropping unserializable log entry");
            None
        }
    }
}

/// Streams entries until every sender is dropped; that close ends the body.
pub fn ndjson_response(rx: UnboundedReceiver<LogEntry>) -> Response {
    let stream = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|entry| (entry, rx))
    })
    .filter_map(|entry| async move { encode_line(&entry).map(Ok::<_, Infallible>) });

    (
        [
            (header::CONTENT_TYPE, NDJSON_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}
