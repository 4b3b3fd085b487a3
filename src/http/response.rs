// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types
//!
//! The response body is modeled so the capture engine can duplicate it once
//! and drain the duplicate internally while the caller's own copy stays
//! untouched. Buffered bodies duplicate as a zero-copy `Bytes` clone;
//! streaming bodies are mirrored chunk-by-chunk into a channel as the caller
//! reads them; opaque bodies cannot be duplicated at all.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use url::Url;

use crate::error::{Error, Result};

/// Stream of response body chunks
pub type ChunkStream = BoxStream<'static, Result<Bytes>>;

/// Response body in one of three readability states
pub enum Body {
    /// Fully buffered body
    Buffered(Bytes),
    /// Body still arriving as a chunk stream. `None` once consumed.
    Streaming(Option<ChunkStream>),
    /// Body the transport refused to expose
    Opaque,
}

impl Body {
    /// Duplicate the body once for internal draining.
    ///
    /// The caller-facing body is left intact: a buffered body hands back a
    /// zero-copy clone, a streaming body is replaced with an identical
    /// stream that mirrors every chunk into the returned reader. Returns
    /// `None` when no duplicate can be made (opaque, or stream already
    /// consumed).
    pub fn tee(&mut self) -> Option<BodyReader> {
        match self {
            Body::Buffered(bytes) => Some(BodyReader(ReaderKind::Buffered(bytes.clone()))),
            Body::Streaming(slot) => {
                let inner = slot.take()?;
                let (tx, rx) = mpsc::unbounded_channel();
                *slot = Some(
                    MirroredStream {
                        inner,
                        tx: Some(tx),
                    }
                    .boxed(),
                );
                Some(BodyReader(ReaderKind::Mirror(rx)))
            }
            Body::Opaque => None,
        }
    }

    /// Whether the body can currently be read
    pub fn is_readable(&self) -> bool {
        matches!(self, Body::Buffered(_) | Body::Streaming(Some(_)))
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Buffered(bytes) => f.debug_tuple("Buffered").field(&bytes.len()).finish(),
            Body::Streaming(Some(_)) => f.write_str("Streaming(pending)"),
            Body::Streaming(None) => f.write_str("Streaming(consumed)"),
            Body::Opaque => f.write_str("Opaque"),
        }
    }
}

enum MirrorEvent {
    Chunk(Bytes),
    Error(String),
    End,
}

/// Stream wrapper that forwards chunks to the caller unchanged while
/// mirroring them to the drain side. The `End` marker distinguishes a fully
/// read body from one the caller dropped midway.
struct MirroredStream {
    inner: ChunkStream,
    tx: Option<mpsc::UnboundedSender<MirrorEvent>>,
}

impl Stream for MirroredStream {
    type Item = Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match this.inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(bytes))) => {
                if let Some(ref tx) = this.tx {
                    let _ = tx.send(MirrorEvent::Chunk(bytes.clone()));
                }
                Poll::Ready(Some(Ok(bytes)))
            }
            Poll::Ready(Some(Err(e))) => {
                if let Some(tx) = this.tx.take() {
                    let _ = tx.send(MirrorEvent::Error(e.to_string()));
                }
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                if let Some(tx) = this.tx.take() {
                    let _ = tx.send(MirrorEvent::End);
                }
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Reader over a duplicated body, handed to the capture engine
#[derive(Debug)]
pub struct BodyReader(ReaderKind);

#[derive(Debug)]
enum ReaderKind {
    Buffered(Bytes),
    Mirror(mpsc::UnboundedReceiver<MirrorEvent>),
}

impl BodyReader {
    /// Drain the duplicate to completion and return its byte count.
    ///
    /// Never touches the caller's copy. For a mirrored stream this resolves
    /// once the caller has fully read (or dropped) their side; the drain
    /// ceiling in the size resolver bounds the wait.
    pub async fn drain(self) -> std::result::Result<u64, String> {
        match self.0 {
            ReaderKind::Buffered(bytes) => Ok(bytes.len() as u64),
            ReaderKind::Mirror(mut rx) => {
                let mut total = 0u64;
                while let Some(event) = rx.recv().await {
                    match event {
                        MirrorEvent::Chunk(bytes) => total += bytes.len() as u64,
                        MirrorEvent::Error(e) => return Err(e),
                        MirrorEvent::End => return Ok(total),
                    }
                }
                Err("response body dropped before it was fully read".to_string())
            }
        }
    }
}

/// HTTP response representation
#[derive(Debug)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response body
    body: Body,
}

impl Response {
    /// Create a response with a fully buffered body
    pub fn buffered(status: StatusCode, headers: HeaderMap, body: Bytes, url: Url) -> Self {
        Self {
            status,
            headers,
            url,
            body: Body::Buffered(body),
        }
    }

    /// Create a response whose body is still arriving
    pub fn streaming(status: StatusCode, headers: HeaderMap, stream: ChunkStream, url: Url) -> Self {
        Self {
            status,
            headers,
            url,
            body: Body::Streaming(Some(stream)),
        }
    }

    /// Create a response whose body is not exposed by the transport
    pub fn opaque(status: StatusCode, headers: HeaderMap, url: Url) -> Self {
        Self {
            status,
            headers,
            url,
            body: Body::Opaque,
        }
    }

    /// Access the body
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable access to the body (used by the capture engine to tee)
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Read the full body, buffering a streaming body in place
    pub async fn bytes(&mut self) -> Result<Bytes> {
        match &mut self.body {
            Body::Buffered(bytes) => Ok(bytes.clone()),
            Body::Streaming(slot) => {
                let mut stream = slot
                    .take()
                    .ok_or_else(|| Error::body_unavailable("body already consumed"))?;
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk?);
                }
                let bytes = buf.freeze();
                self.body = Body::Buffered(bytes.clone());
                Ok(bytes)
            }
            Body::Opaque => Err(Error::body_unavailable("opaque response")),
        }
    }

    /// Read the body as UTF-8 text
    pub async fn text(&mut self) -> Result<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::Other(e.to_string()))
    }

    /// Parse the body as JSON
    pub async fn json<T: DeserializeOwned>(&mut self) -> Result<T> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Error::from)
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(super::headers::CONTENT_TYPE)
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunks(parts: &[&'static str]) -> ChunkStream {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(Bytes::from_static(p.as_bytes())))
                .collect::<Vec<_>>(),
        )
        .boxed()
    }

    fn test_url() -> Url {
        Url::parse("https://example.com/foo").unwrap()
    }

    #[tokio::test]
    async fn test_buffered_tee_is_independent() {
        let mut resp = Response::buffered(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from_static(b"hello world"),
            test_url(),
        );
        let reader = resp.body_mut().tee().unwrap();
        assert_eq!(reader.drain().await, Ok(11));
        // caller's copy untouched
        assert_eq!(resp.bytes().await.unwrap(), Bytes::from_static(b"hello world"));
    }

    #[tokio::test]
    async fn test_streaming_tee_mirrors_full_body() {
        let mut resp = Response::streaming(
            StatusCode::OK,
            HeaderMap::new(),
            chunks(&["hel", "lo ", "world"]),
            test_url(),
        );
        let reader = resp.body_mut().tee().unwrap();

        let body = resp.bytes().await.unwrap();
        assert_eq!(&body[..], b"hello world");
        assert_eq!(reader.drain().await, Ok(11));
    }

    #[tokio::test]
    async fn test_streaming_tee_detects_dropped_body() {
        let mut resp = Response::streaming(
            StatusCode::OK,
            HeaderMap::new(),
            chunks(&["hello"]),
            test_url(),
        );
        let reader = resp.body_mut().tee().unwrap();
        drop(resp);

        assert!(reader.drain().await.is_err());
    }

    #[tokio::test]
    async fn test_opaque_body_not_teeable() {
        let mut resp = Response::opaque(StatusCode::OK, HeaderMap::new(), test_url());
        assert!(resp.body_mut().tee().is_none());
        assert!(resp.bytes().await.is_err());
    }

    #[tokio::test]
    async fn test_consumed_stream_not_teeable() {
        let mut resp = Response::streaming(
            StatusCode::OK,
            HeaderMap::new(),
            chunks(&["hello"]),
            test_url(),
        );
        resp.bytes().await.unwrap();
        // buffered in place after a full read, so still teeable
        assert!(resp.body_mut().tee().is_some());

        let mut taken = Response::streaming(
            StatusCode::OK,
            HeaderMap::new(),
            chunks(&["hello"]),
            test_url(),
        );
        let stream = match taken.body_mut() {
            Body::Streaming(slot) => slot.take(),
            _ => None,
        };
        assert!(stream.is_some());
        assert!(taken.body_mut().tee().is_none());
    }
}
