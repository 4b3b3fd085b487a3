// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header sanitization against an allow-list
//!
//! Only allow-listed header names survive into captured records. Anything
//! withheld is accounted for by a warning tag rather than silently absent.

use reqwest::header::HeaderMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::warning::Warning;

/// Order-preserving snapshot of sanitized headers.
///
/// Serializes as a JSON object with entries in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSnapshot(Vec<(String, String)>);

impl HeaderSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Look up a header value (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the snapshot contains no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate entries in encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Serialize for HeaderSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Copy allow-listed headers out of `headers`, in encounter order.
///
/// An empty allow-list (the privacy-first default) withholds everything and
/// records `HEADERS_SKIPPED` once, not once per header. The same single tag
/// covers any non-allow-listed names dropped from a non-empty collection.
/// `None` headers (transport did not expose them) yield a distinct
/// diagnostic.
pub fn sanitize(headers: Option<&HeaderMap>, allow_list: &[String]) -> (HeaderSnapshot, Vec<Warning>) {
    let headers = match headers {
        Some(h) => h,
        None => return (HeaderSnapshot::new(), vec![Warning::HeadersUnavailable]),
    };

    let mut snapshot = HeaderSnapshot::new();
    let mut omitted = false;

    for (name, value) in headers.iter() {
        let allowed = allow_list
            .iter()
            .any(|a| a.eq_ignore_ascii_case(name.as_str()));
        if !allowed {
            omitted = true;
            continue;
        }
        if let Ok(value) = value.to_str() {
            snapshot.insert(name.as_str(), value);
        }
    }

    let warnings = if omitted && !headers.is_empty() {
        vec![Warning::HeadersSkipped]
    } else {
        Vec::new()
    };

    (snapshot, warnings)
}
