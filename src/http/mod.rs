// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer wrapped by the capture engine
//!
//! Provides a lightweight client plus request/response types whose bodies
//! can be duplicated once without disturbing the caller's own consumption.

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use request::Request;
pub use response::{Body, BodyReader, ChunkStream, Response};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("remora/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const USER_AGENT: &str = "user-agent";
    pub const AUTHORIZATION: &str = "authorization";
}
