// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network interception and metadata resolution
//!
//! Wraps the HTTP layer, derives a normalized description of every
//! request/response pair, and fans it out to the breadcrumb scope and the
//! session-recording buffer without ever touching the caller's request
//! lifecycle.

pub mod headers;
mod interceptor;
mod metadata;
pub mod size;
pub mod url;
mod warning;

pub use headers::HeaderSnapshot;
pub use interceptor::{install, installed, uninstall, Capture, CaptureClient};
pub use metadata::{epoch_secs, NetworkRequestMetadata};
pub use size::ResolvedSize;
pub use url::UrlDecision;
pub use warning::Warning;
