// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response size resolution
//!
//! Strategy chain, cheapest first: a usable content-length header resolves
//! synchronously; otherwise a duplicated body is drained under a ceiling;
//! otherwise the size stays unresolved and a warning tag explains why.
//! Resolution never touches the body the application itself will read.

use std::time::Duration;

use reqwest::header::HeaderMap;

use super::warning::Warning;
use crate::http::headers::CONTENT_LENGTH;
use crate::http::BodyReader;

/// Result of a size resolution pass
#[derive(Debug, Default)]
pub struct ResolvedSize {
    /// Best-effort byte count, absent when unresolvable
    pub size: Option<u64>,
    /// Why the size (or part of it) could not be resolved
    pub warnings: Vec<Warning>,
}

/// Parse the content-length header. An empty-string or non-numeric value is
/// treated as absent, not as zero and not as an error.
pub fn header_size(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(CONTENT_LENGTH)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<u64>().ok()
}

/// Resolve the response size through the strategy chain.
///
/// `reader` is the duplicate produced by [`crate::http::Body::tee`]; the
/// caller's own body is never consumed here. Drain failures and ceiling
/// timeouts degrade to an unresolved size, never an error.
pub async fn resolve(
    headers: &HeaderMap,
    reader: Option<BodyReader>,
    drain_enabled: bool,
    ceiling: Duration,
) -> ResolvedSize {
    if let Some(size) = header_size(headers) {
        return ResolvedSize {
            size: Some(size),
            warnings: Vec::new(),
        };
    }

    if drain_enabled {
        if let Some(reader) = reader {
            return match tokio::time::timeout(ceiling, reader.drain()).await {
                Ok(Ok(size)) => ResolvedSize {
                    size: Some(size),
                    warnings: Vec::new(),
                },
                Ok(Err(e)) => {
                    tracing::debug!(error = %e, "failed to drain duplicated response body");
                    ResolvedSize {
                        size: None,
                        warnings: vec![Warning::BodyParseError],
                    }
                }
                Err(_) => {
                    tracing::debug!(ceiling_ms = ceiling.as_millis() as u64, "body drain hit ceiling");
                    ResolvedSize {
                        size: None,
                        warnings: vec![Warning::BodyParseError],
                    }
                }
            };
        }
    }

    ResolvedSize {
        size: None,
        warnings: vec![Warning::BodyUnreadable],
    }
}
