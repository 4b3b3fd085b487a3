// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Performance spans and the session-recording buffer
//!
//! Wire shapes use camelCase field names and partition warnings under
//! per-direction `_meta` blocks; downstream recording serializers depend on
//! these exact names.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use super::NetworkEmitter;
use crate::capture::{HeaderSnapshot, NetworkRequestMetadata, Warning};

/// Operation tag for network spans
pub const SPAN_OP: &str = "resource.fetch";

/// Timed record of one network call inside a session recording
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSpan {
    /// Fixed operation tag
    pub op: String,
    /// The request URL, verbatim
    pub description: String,
    pub start_timestamp: f64,
    pub end_timestamp: f64,
    pub data: SpanData,
}

/// Span payload
#[derive(Debug, Clone, Serialize)]
pub struct SpanData {
    pub method: String,
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub request: SpanDirection,
    pub response: SpanDirection,
}

/// One direction (request or response) of a span's capture detail
#[derive(Debug, Clone, Serialize)]
pub struct SpanDirection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub headers: HeaderSnapshot,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<SpanMeta>,
}

/// Provenance block explaining withheld or unresolvable fields
#[derive(Debug, Clone, Serialize)]
pub struct SpanMeta {
    pub warnings: Vec<Warning>,
}

fn direction(headers: &HeaderSnapshot, size: Option<u64>, warnings: &[Warning]) -> SpanDirection {
    SpanDirection {
        size,
        headers: headers.clone(),
        meta: if warnings.is_empty() {
            None
        } else {
            Some(SpanMeta {
                warnings: warnings.to_vec(),
            })
        },
    }
}

impl PerformanceSpan {
    /// Project a span out of finished call metadata
    pub fn from_metadata(meta: &NetworkRequestMetadata) -> Self {
        Self {
            op: SPAN_OP.to_string(),
            description: meta.url.clone(),
            start_timestamp: meta.start_timestamp,
            end_timestamp: meta.end_timestamp,
            data: SpanData {
                method: meta.method.clone(),
                status_code: meta.status_code,
                request: direction(
                    &meta.request_headers,
                    meta.request_body_size,
                    &meta.request_warnings,
                ),
                response: direction(
                    &meta.response_headers,
                    meta.response_body_size,
                    &meta.response_warnings,
                ),
            },
        }
    }
}

/// Session-recording buffer holding spans until its owner flushes them
#[derive(Debug, Default)]
pub struct ReplayBuffer {
    spans: Mutex<Vec<PerformanceSpan>>,
}

impl ReplayBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span. Fire-and-forget; ordering is completion order.
    pub fn append(&self, span: PerformanceSpan) {
        self.spans.lock().push(span);
    }

    /// Drain all buffered spans, leaving the buffer empty
    pub fn flush(&self) -> Vec<PerformanceSpan> {
        std::mem::take(&mut *self.spans.lock())
    }

    /// Snapshot without draining
    pub fn spans(&self) -> Vec<PerformanceSpan> {
        self.spans.lock().clone()
    }

    /// Number of buffered spans
    pub fn len(&self) -> usize {
        self.spans.lock().len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.spans.lock().is_empty()
    }

    /// Serialize the buffered spans
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.spans())
    }
}

/// Emitter appending spans onto the recording buffer
pub struct ReplaySpanRecorder {
    buffer: Arc<ReplayBuffer>,
}

impl ReplaySpanRecorder {
    /// Create a recorder bound to a buffer
    pub fn new(buffer: Arc<ReplayBuffer>) -> Self {
        Self { buffer }
    }
}

impl NetworkEmitter for ReplaySpanRecorder {
    fn emit(&self, metadata: &NetworkRequestMetadata) {
        self.buffer.append(PerformanceSpan::from_metadata(metadata));
    }
}
