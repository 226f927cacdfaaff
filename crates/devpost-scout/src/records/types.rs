// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! The project record produced by normalization.

use serde::{Deserialize, Serialize};

/// Placeholder written when a title or tagline is absent from the source.
pub const MISSING_TEXT: &str = "N/A";

/// One project listing from the showcase site.
///
/// `url` is always absolute and is the identity of the record. The optional
/// fields are only populated from structured (JSON) payloads and are left out
/// of the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub url: String,
    #[serde(default = "missing_text")]
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
}

fn missing_text() -> String {
    MISSING_TEXT.to_string()
}

impl ProjectRecord {
    /// Build a record from markup, where only title, url and tagline exist.
    pub fn from_markup(title: String, url: String, tagline: Option<String>) -> Self {
        Self {
            title,
            url,
            tagline: tagline.unwrap_or_else(missing_text),
            tags: None,
            like_count: None,
            comment_count: None,
        }
    }

    /// Whether the tagline is the placeholder rather than real text.
    pub fn has_tagline(&self) -> bool {
        self.tagline != MISSING_TEXT
    }
}
