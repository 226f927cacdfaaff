// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fetching search pages and normalizing them into project records.
//!
//! The fetcher returns raw responses; the normalizer decides whether a body
//! is a JSON payload or markup and hands it to the matching extractor.

pub mod http_client;
pub mod markup;
pub mod normalizer;
pub mod payload;
