// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Warning tags recorded in place of omitted capture data
//!
//! Downstream serializers and fixtures depend on the exact wire strings, so
//! the enum serializes as its bare tag. Unknown tags deserialize into
//! `Other` so consumers that pattern-match on known tags keep working when
//! new ones appear.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Reason a captured field was omitted or degraded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Destination not in the URL allow-list; header details withheld
    UrlSkipped,
    /// Header allow-list empty; all headers withheld
    HeadersSkipped,
    /// Header collection not exposed by the transport
    HeadersUnavailable,
    /// Body duplicate could not be read to completion
    BodyParseError,
    /// Body could not be duplicated (opaque or already consumed)
    BodyUnreadable,
    /// The wrapped call settled without a response
    NoResponse,
    /// Tag this version does not know about
    Other(String),
}

impl Warning {
    /// Wire string for this tag
    pub fn as_str(&self) -> &str {
        match self {
            Warning::UrlSkipped => "URL_SKIPPED",
            Warning::HeadersSkipped => "HEADERS_SKIPPED",
            Warning::HeadersUnavailable => "HEADERS_UNAVAILABLE",
            Warning::BodyParseError => "BODY_PARSE_ERROR",
            Warning::BodyUnreadable => "BODY_UNREADABLE",
            Warning::NoResponse => "NO_RESPONSE",
            Warning::Other(s) => s,
        }
    }
}

impl From<&str> for Warning {
    fn from(s: &str) -> Self {
        match s {
            "URL_SKIPPED" => Warning::UrlSkipped,
            "HEADERS_SKIPPED" => Warning::HeadersSkipped,
            "HEADERS_UNAVAILABLE" => Warning::HeadersUnavailable,
            "BODY_PARSE_ERROR" => Warning::BodyParseError,
            "BODY_UNREADABLE" => Warning::BodyUnreadable,
            "NO_RESPONSE" => Warning::NoResponse,
            other => Warning::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Warning {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor;

        impl<'de> Visitor<'de> for TagVisitor {
            type Value = Warning;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a warning tag string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Warning, E> {
                Ok(Warning::from(v))
            }
        }

        deserializer.deserialize_str(TagVisitor)
    }
}
