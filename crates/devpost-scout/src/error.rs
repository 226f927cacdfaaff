// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the scraping library.

/// Errors raised while fetching, normalizing or persisting project records.
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("profile error: {0}")]
    Profile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ScoutResult<T> = Result<T, ScoutError>;
