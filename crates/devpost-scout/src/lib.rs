// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Devpost Scout library: search-result scraping, deduplication and
//! keyword classification of hackathon projects.
//!
//! This library crate exposes the core modules for integration testing.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod progress;
pub mod records;
