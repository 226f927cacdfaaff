// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Structured (JSON) search payloads.

use crate::error::{ScoutError, ScoutResult};
use crate::records::types::{ProjectRecord, MISSING_TEXT};
use serde_json::Value;
use url::Url;

/// Shape of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Json,
    Markup,
}

impl PayloadKind {
    /// Classify by Content-Type. Anything that is not JSON is read as markup.
    pub fn detect(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.to_ascii_lowercase().contains("application/json") => Self::Json,
            _ => Self::Markup,
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Markup => write!(f, "markup"),
        }
    }
}

/// Field names that locate items inside a JSON payload.
#[derive(Debug, Clone)]
pub struct JsonLayout<'a> {
    pub collection_field: &'a str,
    pub winner_field: &'a str,
    pub winners_only: bool,
}

/// Map the items of a JSON search payload to records.
///
/// A payload without the collection field reads as an empty page. A body
/// that is not JSON at all, or whose collection field is not a list, is a
/// [`ScoutError::MalformedPayload`].
pub fn extract_json(
    body: &str,
    layout: &JsonLayout<'_>,
    base: &Url,
) -> ScoutResult<Vec<ProjectRecord>> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| ScoutError::MalformedPayload(format!("invalid JSON: {e}")))?;

    let items = match data.get(layout.collection_field) {
        None | Some(Value::Null) => {
            tracing::debug!(
                "JSON payload has no '{}' field, reading as empty page",
                layout.collection_field
            );
            return Ok(Vec::new());
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ScoutError::MalformedPayload(format!(
                "'{}' is {}, expected a list",
                layout.collection_field,
                json_type_name(other)
            )))
        }
    };

    let mut records = Vec::new();
    for item in items {
        if !item.is_object() {
            continue;
        }
        if layout.winners_only && !item.get(layout.winner_field).is_some_and(is_truthy) {
            continue;
        }
        match parse_item(item, base) {
            Some(rec) => records.push(rec),
            None => tracing::debug!("skipping JSON item without a usable url"),
        }
    }
    Ok(records)
}

fn parse_item(item: &Value, base: &Url) -> Option<ProjectRecord> {
    let raw_url = item.get("url").and_then(Value::as_str)?.trim();
    if raw_url.is_empty() {
        return None;
    }
    let url = base.join(raw_url).ok()?.to_string();

    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(MISSING_TEXT)
            .to_string()
    };
    let count = |key: &str| item.get(key).and_then(Value::as_u64).unwrap_or(0);

    let tags = item
        .get("tags")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();

    Some(ProjectRecord {
        title: text("name"),
        url,
        tagline: text("tagline"),
        tags: Some(tags),
        like_count: Some(count("like_count")),
        comment_count: Some(count("comment_count")),
    })
}

/// Loose truth test for flag fields: `true`, a non-zero number and a
/// non-empty string, list or object all count as set.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
