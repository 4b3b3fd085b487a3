// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network breadcrumbs and the bounded scope that owns them

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::Serialize;

use super::NetworkEmitter;
use crate::capture::NetworkRequestMetadata;

/// Category identifying a network breadcrumb
pub const BREADCRUMB_CATEGORY: &str = "fetch";

/// Transport kind recorded on network breadcrumbs
pub const BREADCRUMB_TYPE: &str = "http";

/// One timestamped record of a network call, attached to the next error report
#[derive(Debug, Clone, Serialize)]
pub struct Breadcrumb {
    /// Fixed category tag
    pub category: String,
    /// Transport kind
    #[serde(rename = "type")]
    pub kind: String,
    /// Settlement time, fractional epoch seconds
    pub timestamp: f64,
    /// Flattened projection of the call metadata
    pub data: BreadcrumbData,
}

/// Breadcrumb payload; optional fields are omitted when unresolvable
#[derive(Debug, Clone, Serialize)]
pub struct BreadcrumbData {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body_size: Option<u64>,
}

impl Breadcrumb {
    /// Project a breadcrumb out of finished call metadata
    pub fn from_metadata(meta: &NetworkRequestMetadata) -> Self {
        Self {
            category: BREADCRUMB_CATEGORY.to_string(),
            kind: BREADCRUMB_TYPE.to_string(),
            timestamp: meta.end_timestamp,
            data: BreadcrumbData {
                method: meta.method.clone(),
                url: meta.url.clone(),
                status_code: meta.status_code,
                response_body_size: meta.response_body_size,
            },
        }
    }
}

/// Error-reporting scope holding a bounded, oldest-evicted breadcrumb trail
#[derive(Debug)]
pub struct Scope {
    breadcrumbs: Mutex<VecDeque<Breadcrumb>>,
    max_breadcrumbs: usize,
}

impl Scope {
    /// Create a scope with the given capacity
    pub fn new(max_breadcrumbs: usize) -> Self {
        Self {
            breadcrumbs: Mutex::new(VecDeque::with_capacity(max_breadcrumbs.min(64))),
            max_breadcrumbs,
        }
    }

    /// Append a breadcrumb, evicting the oldest beyond capacity.
    /// Fire-and-forget: never raises to the caller.
    pub fn add(&self, breadcrumb: Breadcrumb) {
        if self.max_breadcrumbs == 0 {
            return;
        }
        let mut crumbs = self.breadcrumbs.lock();
        if crumbs.len() >= self.max_breadcrumbs {
            crumbs.pop_front();
        }
        crumbs.push_back(breadcrumb);
    }

    /// Snapshot of the current trail, oldest first
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.breadcrumbs.lock().iter().cloned().collect()
    }

    /// Number of retained breadcrumbs
    pub fn len(&self) -> usize {
        self.breadcrumbs.lock().len()
    }

    /// Whether the trail is empty
    pub fn is_empty(&self) -> bool {
        self.breadcrumbs.lock().is_empty()
    }

    /// Drop all retained breadcrumbs
    pub fn clear(&self) {
        self.breadcrumbs.lock().clear();
    }
}

/// Emitter appending network breadcrumbs onto a scope
pub struct BreadcrumbEmitter {
    scope: std::sync::Arc<Scope>,
}

impl BreadcrumbEmitter {
    /// Create an emitter bound to a scope
    pub fn new(scope: std::sync::Arc<Scope>) -> Self {
        Self { scope }
    }
}

impl NetworkEmitter for BreadcrumbEmitter {
    fn emit(&self, metadata: &NetworkRequestMetadata) {
        self.scope.add(Breadcrumb::from_metadata(metadata));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(url: &str) -> NetworkRequestMetadata {
        NetworkRequestMetadata::new("GET", url, 1.0, 2.0).with_status(200)
    }

    #[test]
    fn test_projection() {
        let mut m = meta("http://localhost:7654/foo");
        m.response_body_size = Some(789);

        let crumb = Breadcrumb::from_metadata(&m);
        assert_eq!(crumb.category, "fetch");
        assert_eq!(crumb.kind, "http");
        assert_eq!(crumb.timestamp, 2.0);
        assert_eq!(crumb.data.status_code, Some(200));
        assert_eq!(crumb.data.response_body_size, Some(789));
    }

    #[test]
    fn test_wire_shape_omits_unresolved_fields() {
        let crumb = Breadcrumb::from_metadata(&NetworkRequestMetadata::new(
            "GET",
            "http://localhost:7654/foo",
            1.0,
            2.0,
        ));
        let json = serde_json::to_value(&crumb).unwrap();

        assert_eq!(json["category"], "fetch");
        assert_eq!(json["type"], "http");
        assert_eq!(json["data"]["method"], "GET");
        assert!(json["data"].get("status_code").is_none());
        assert!(json["data"].get("response_body_size").is_none());
    }

    #[test]
    fn test_scope_evicts_oldest() {
        let scope = Scope::new(2);
        for i in 0..3 {
            scope.add(Breadcrumb::from_metadata(&meta(&format!("https://example.com/{}", i))));
        }

        let crumbs = scope.breadcrumbs();
        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs[0].data.url, "https://example.com/1");
        assert_eq!(crumbs[1].data.url, "https://example.com/2");
    }

    #[test]
    fn test_zero_capacity_scope() {
        let scope = Scope::new(0);
        scope.add(Breadcrumb::from_metadata(&meta("https://example.com")));
        assert!(scope.is_empty());
    }
}
