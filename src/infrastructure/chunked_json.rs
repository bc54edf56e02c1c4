// Chunked newline-delimited JSON streaming of playback frames
use crate::domain::frame::FrameView;
use crate::infrastructure::json_mapper::frame_to_dto;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::broadcast;

/// Create a chunked NDJSON streaming response, one frame per line
pub fn chunked_frame_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = FrameView> + Send + 'static,
{
    let byte_stream = stream.map(|view| serialize_chunk(&view));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

fn serialize_chunk(view: &FrameView) -> Result<Bytes, serde_json::Error> {
    let payload = serde_json::to_vec(&frame_to_dto(view))?;

    let mut chunk = BytesMut::with_capacity(payload.len() + 1);
    chunk.put_slice(&payload);
    chunk.put_u8(b'\n');

    Ok(chunk.freeze())
}

/// Stream the current frame followed by every published update
pub fn stream_from_receiver(
    current: FrameView,
    mut rx: broadcast::Receiver<FrameView>,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        yield current;
        loop {
            match rx.recv().await {
                Ok(view) => yield view,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Frame stream subscriber lagged, skipped {} frames", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    match chunked_frame_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
