// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! SDK-wide capture configuration
//!
//! Privacy-first defaults: no headers are captured unless allow-listed,
//! no URL is considered detail-safe unless allow-listed, and body-size
//! resolution via draining is enabled but bounded.

use std::time::Duration;

/// Default breadcrumb scope capacity
pub const DEFAULT_MAX_BREADCRUMBS: usize = 100;

/// Default ceiling for draining a duplicated response body
pub const DEFAULT_BODY_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Request header names permitted in captured records (case-insensitive)
    pub request_headers_allow: Vec<String>,
    /// Response header names permitted in captured records (case-insensitive)
    pub response_headers_allow: Vec<String>,
    /// URL patterns whose header details may be captured.
    /// Plain entries match as substrings; `*` acts as a wildcard.
    pub allow_urls: Vec<String>,
    /// Resolve response sizes by draining a duplicated body when no usable
    /// content-length header exists. Has a measurable cost per response.
    pub capture_body_sizes: bool,
    /// Maximum breadcrumbs retained by a scope (oldest evicted)
    pub max_breadcrumbs: usize,
    /// Ceiling for the body-drain step so a never-ending response body
    /// cannot leave an enrichment continuation pending
    pub body_drain_timeout: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            request_headers_allow: Vec::new(),
            response_headers_allow: Vec::new(),
            allow_urls: Vec::new(),
            capture_body_sizes: true,
            max_breadcrumbs: DEFAULT_MAX_BREADCRUMBS,
            body_drain_timeout: DEFAULT_BODY_DRAIN_TIMEOUT,
        }
    }
}

impl CaptureConfig {
    /// Create a new capture config with privacy-first defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow a request header name to be captured
    pub fn allow_request_header(mut self, name: impl Into<String>) -> Self {
        self.request_headers_allow.push(name.into());
        self
    }

    /// Allow a response header name to be captured
    pub fn allow_response_header(mut self, name: impl Into<String>) -> Self {
        self.response_headers_allow.push(name.into());
        self
    }

    /// Allow a header name in both directions
    pub fn allow_header(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.allow_request_header(name.clone())
            .allow_response_header(name)
    }

    /// Allow header detail capture for URLs matching the pattern
    pub fn allow_url(mut self, pattern: impl Into<String>) -> Self {
        self.allow_urls.push(pattern.into());
        self
    }

    /// Enable/disable size resolution via body draining
    pub fn capture_body_sizes(mut self, enabled: bool) -> Self {
        self.capture_body_sizes = enabled;
        self
    }

    /// Set breadcrumb scope capacity
    pub fn max_breadcrumbs(mut self, max: usize) -> Self {
        self.max_breadcrumbs = max;
        self
    }

    /// Set the body-drain ceiling
    pub fn body_drain_timeout(mut self, timeout: Duration) -> Self {
        self.body_drain_timeout = timeout;
        self
    }

    /// Config suited to low-overhead error monitoring: no body draining
    pub fn for_error_monitoring() -> Self {
        Self {
            capture_body_sizes: false,
            ..Default::default()
        }
    }
}
