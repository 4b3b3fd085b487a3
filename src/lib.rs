// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Remora - Client-Side Network Observability
//!
//! Remora wraps an application's outgoing HTTP requests and captures a
//! normalized record of every request/response pair, without ever changing
//! what the application sees: the wrapped call settles with the same value,
//! the same rejection, and the same timing as the unwrapped one.
//!
//! Each record fans out to two independent consumers:
//!
//! - a bounded **breadcrumb** trail attached to the next error report
//! - a **performance span** stream embedded in a session recording
//!
//! ## Privacy
//!
//! Nothing sensitive is captured by default. Headers are withheld unless
//! allow-listed, header details for non-allow-listed destinations are
//! withheld entirely, and every withheld field is accounted for by a
//! structured warning tag instead of going silently missing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use remora::{Capture, CaptureClient, CaptureConfig, HttpClient};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CaptureConfig::new()
//!         .allow_header("content-type")
//!         .allow_url("https://api.example.com/*");
//!     let capture = remora::install(Capture::new(config));
//!
//!     let client = CaptureClient::new(HttpClient::new()?, capture);
//!     let mut response = client.get("https://api.example.com/users").await?;
//!     let _body = response.bytes().await?;
//!
//!     client.capture().flush(Duration::from_secs(2)).await;
//!     for crumb in client.capture().scope().breadcrumbs() {
//!         println!("{} {}", crumb.data.method, crumb.data.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod config;
pub mod emit;
pub mod error;
pub mod http;

// Re-exports for convenience

// Capture engine
pub use capture::{
    install, installed, uninstall, Capture, CaptureClient, HeaderSnapshot,
    NetworkRequestMetadata, Warning,
};

// Configuration
pub use config::CaptureConfig;

// Consumers
pub use emit::{Breadcrumb, NetworkEmitter, PerformanceSpan, ReplayBuffer, Scope};

// Errors
pub use error::{Error, Result};

// HTTP layer
pub use http::{Body, BodyReader, HttpClient, Request, Response};

/// Remora version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
