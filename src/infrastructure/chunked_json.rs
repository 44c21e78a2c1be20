// Chunked JSON streaming utilities
//
// Each frame is a 4-byte big-endian length followed by the payload: one JSON
// message, Brotli-compressed per frame when requested.
use crate::application::streaming_service::StreamMessage;
use crate::infrastructure::http_response::brotli_compress;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;

pub const FRAME_CONTENT_TYPE: &str = "application/x-fleet-frames";

/// Create a chunked streaming response
pub async fn chunked_json_stream<S>(
    stream: S,
    compress: bool,
) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamMessage> + Send + 'static,
{
    let byte_stream = stream.then(move |msg| async move { serialize_chunk(msg, compress).await });

    let body = Body::from_stream(byte_stream);

    // Frames are compressed individually, so no Content-Encoding header.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, FRAME_CONTENT_TYPE)
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn serialize_chunk(msg: StreamMessage, compress: bool) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(&msg)?;

    let payload = if compress {
        brotli_compress(json).await?
    } else {
        json
    };

    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(payload.len() as u32);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a receiver
pub async fn stream_from_receiver(
    mut rx: tokio::sync::mpsc::Receiver<StreamMessage>,
    compress: bool,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };

    match chunked_json_stream(stream, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Split a buffer of uncompressed frames back into payloads.
#[cfg(test)]
pub(crate) fn decode_frames(mut bytes: &[u8]) -> Option<Vec<Vec<u8>>> {
    let mut frames = Vec::new();
    while !bytes.is_empty() {
        if bytes.len() < 4 {
            return None;
        }
        let len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let rest = &bytes[4..];
        if rest.len() < len {
            return None;
        }
        frames.push(rest[..len].to_vec());
        bytes = &rest[len..];
    }
    Some(frames)
}
