// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Consumers of interception results
//!
//! Emitters are pure projections over [`NetworkRequestMetadata`]; they
//! select and rename fields but never re-derive capture decisions. Fan-out
//! isolates each emitter so failure of one cannot suppress another.

mod breadcrumb;
mod replay;

pub use breadcrumb::{Breadcrumb, BreadcrumbData, BreadcrumbEmitter, Scope};
pub use replay::{
    PerformanceSpan, ReplayBuffer, ReplaySpanRecorder, SpanData, SpanDirection, SpanMeta,
};

use crate::capture::NetworkRequestMetadata;

/// A consumer of finished interception records.
///
/// Emission is fire-and-forget: implementations append to their own buffer
/// and must not raise to the interceptor.
pub trait NetworkEmitter: Send + Sync {
    /// Consume one record
    fn emit(&self, metadata: &NetworkRequestMetadata);
}
