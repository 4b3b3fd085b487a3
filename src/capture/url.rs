// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL allow-list decisions
//!
//! The destination URL itself is always recorded verbatim; the allow-list
//! only gates whether header details for that destination may be captured.
//! Patterns match as substrings, with `*` acting as a wildcard.

use regex::Regex;

use super::warning::Warning;

/// Outcome of checking a request URL against the allow-list
#[derive(Debug, Clone)]
pub struct UrlDecision {
    /// The URL as recorded in emitted records (verbatim)
    pub url: String,
    /// Whether header details for this destination may be captured
    pub allowed: bool,
    /// `URL_SKIPPED` when not allowed, recorded against both directions
    pub warnings: Vec<Warning>,
}

/// Check a URL against the configured allow-list of patterns.
pub fn normalize(url: &str, allow_list: &[String]) -> UrlDecision {
    let allowed = allow_list.iter().any(|pattern| matches(pattern, url));
    let warnings = if allowed {
        Vec::new()
    } else {
        vec![Warning::UrlSkipped]
    };

    UrlDecision {
        url: url.to_string(),
        allowed,
        warnings,
    }
}

fn matches(pattern: &str, url: &str) -> bool {
    if !pattern.contains('*') {
        return url.contains(pattern);
    }

    let escaped = regex::escape(pattern).replace("\\*", ".*");
    match Regex::new(&escaped) {
        Ok(re) => re.is_match(url),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "invalid URL allow pattern");
            false
        }
    }
}
