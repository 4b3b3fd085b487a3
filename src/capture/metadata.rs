// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Normalized description of one request/response pair
//!
//! Built exactly once per intercepted call, after the wrapped call settles.
//! The breadcrumb and span emitters are pure projections over this type and
//! never re-derive sanitization or size decisions.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::headers::HeaderSnapshot;
use super::warning::Warning;

/// Current wall-clock time as fractional epoch seconds
pub fn epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Normalized metadata for one intercepted network call
#[derive(Debug, Clone, Serialize)]
pub struct NetworkRequestMetadata {
    /// Uppercase HTTP verb
    pub method: String,
    /// Request URL, recorded verbatim
    pub url: String,
    /// Fractional epoch seconds at request start
    pub start_timestamp: f64,
    /// Fractional epoch seconds at settlement; derived from a monotonic
    /// delta off the start so it can never precede it
    pub end_timestamp: f64,
    /// Absent when the wrapped call settled without a response
    pub status_code: Option<u16>,
    /// Sanitized request headers (allow-listed only)
    pub request_headers: HeaderSnapshot,
    /// Sanitized response headers (allow-listed only)
    pub response_headers: HeaderSnapshot,
    /// Request body size in bytes, when known
    pub request_body_size: Option<u64>,
    /// Best-effort response body size in bytes
    pub response_body_size: Option<u64>,
    /// Warnings about withheld or unresolvable request-side data
    pub request_warnings: Vec<Warning>,
    /// Warnings about withheld or unresolvable response-side data
    pub response_warnings: Vec<Warning>,
}

impl NetworkRequestMetadata {
    /// Create metadata with the fields known at settlement time
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        start_timestamp: f64,
        end_timestamp: f64,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            start_timestamp,
            end_timestamp: end_timestamp.max(start_timestamp),
            status_code: None,
            request_headers: HeaderSnapshot::new(),
            response_headers: HeaderSnapshot::new(),
            request_body_size: None,
            response_body_size: None,
            request_warnings: Vec::new(),
            response_warnings: Vec::new(),
        }
    }

    /// Set the response status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// All warnings across both directions
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.request_warnings
            .iter()
            .chain(self.response_warnings.iter())
    }

    /// Duration of the call in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end_timestamp - self.start_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_never_precedes_start() {
        let meta = NetworkRequestMetadata::new("GET", "https://example.com", 100.0, 99.0);
        assert_eq!(meta.end_timestamp, 100.0);
        assert!(meta.duration_secs() >= 0.0);
    }

    #[test]
    fn test_warnings_span_both_directions() {
        let mut meta = NetworkRequestMetadata::new("GET", "https://example.com", 1.0, 2.0);
        meta.request_warnings.push(Warning::UrlSkipped);
        meta.response_warnings.push(Warning::NoResponse);

        let all: Vec<_> = meta.warnings().collect();
        assert_eq!(all, vec![&Warning::UrlSkipped, &Warning::NoResponse]);
    }

    #[test]
    fn test_epoch_secs_is_positive() {
        assert!(epoch_secs() > 0.0);
    }
}
