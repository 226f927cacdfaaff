// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI subcommand implementations for the devpost-scout binary.

pub mod filter_cmd;
pub mod output;
pub mod probe_cmd;
pub mod progress_view;
pub mod scrape_cmd;
pub mod search_cmd;

use crate::config::{ScrapeSettings, SiteProfile, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use std::time::Duration;

/// Site and request flags shared by every network command.
#[derive(Debug, Clone, Args)]
pub struct SiteArgs {
    /// Include non-winning entries (default: contest winners only)
    #[arg(long)]
    pub all_entries: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Override the site origin (e.g. "http://127.0.0.1:8080")
    #[arg(long)]
    pub base_url: Option<String>,

    /// Load selectors and field names from a site profile JSON file
    #[arg(long)]
    pub profile: Option<String>,
}

impl SiteArgs {
    /// Resolve the site profile: `--profile` file or the embedded default,
    /// then `--base-url` on top.
    pub fn load_profile(&self) -> Result<SiteProfile> {
        let profile = match &self.profile {
            Some(path) => SiteProfile::from_file(Path::new(path))
                .with_context(|| format!("failed to load profile {path}"))?,
            None => SiteProfile::default(),
        };
        Ok(match &self.base_url {
            Some(base) => profile.with_base_url(base),
            None => profile,
        })
    }

    /// Scrape settings for a run of at most `max_pages` pages per query.
    pub fn settings(&self, max_pages: u32, delay_ms: u64) -> ScrapeSettings {
        ScrapeSettings {
            max_pages,
            delay: Duration::from_millis(delay_ms),
            winners_only: !self.all_entries,
            timeout: Duration::from_secs(self.timeout_secs),
            ..ScrapeSettings::default()
        }
    }
}
