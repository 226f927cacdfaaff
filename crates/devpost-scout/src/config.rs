// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Site profile and scrape settings.
//!
//! The site profile describes where the search endpoint lives and how to
//! read its two payload shapes. The default profile is embedded at compile
//! time from `profiles/devpost.json`; `--profile` swaps in another file so
//! new markup variants can be handled without code changes.

use crate::error::{ScoutError, ScoutResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Raw JSON of the built-in profile.
const DEFAULT_PROFILE_JSON: &str = include_str!("profiles/devpost.json");

/// Identifying client header sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/91.0.4472.124 Safari/537.36";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One way of locating project entries in the search page markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorStrategy {
    /// Label used in logs and probe output.
    pub name: String,
    /// Selector for the element wrapping one project.
    pub container: String,
    /// Selector, inside the container, for the title element.
    pub title: String,
    /// Selector, inside the container, for the project link.
    pub link: String,
    /// Selector, inside the container, for the tagline. Optional in the page.
    pub tagline: String,
}

/// Everything site-specific the scraper needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Scheme + host that relative links are resolved against.
    pub base_url: String,
    /// Path of the search endpoint.
    pub search_path: String,
    /// Query prefix restricting results to contest winners.
    pub winner_token: String,
    /// Top-level field holding the item list in JSON responses.
    pub collection_field: String,
    /// Per-item boolean flag marking a winner in JSON responses.
    pub winner_field: String,
    /// Markup strategies, tried in order.
    pub strategies: Vec<SelectorStrategy>,
    /// Extra selectors whose match counts `probe` reports.
    #[serde(default)]
    pub probe_selectors: Vec<String>,
}

impl SiteProfile {
    /// Load a profile from a JSON file.
    pub fn from_file(path: &Path) -> ScoutResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let profile: SiteProfile = serde_json::from_str(&text)
            .map_err(|e| ScoutError::Profile(format!("{}: {e}", path.display())))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Replace the site origin, keeping everything else.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL of the search endpoint.
    pub fn search_url(&self) -> ScoutResult<String> {
        let base = url::Url::parse(&self.base_url)?;
        Ok(base.join(&self.search_path)?.to_string())
    }

    /// The text sent as the `query` parameter.
    pub fn search_query(&self, query: &str, winners_only: bool) -> String {
        if winners_only {
            format!("{} {}", self.winner_token, query).trim().to_string()
        } else {
            query.trim().to_string()
        }
    }

    fn validate(&self) -> ScoutResult<()> {
        url::Url::parse(&self.base_url)?;
        if self.collection_field.is_empty() {
            return Err(ScoutError::Profile("collection_field is empty".into()));
        }
        if self.strategies.is_empty() {
            return Err(ScoutError::Profile(
                "at least one selector strategy is required".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        // Embedded profile parse is checked by test_embedded_profile_parses.
        serde_json::from_str(DEFAULT_PROFILE_JSON).unwrap_or_else(|_| SiteProfile {
            base_url: "https://devpost.com".to_string(),
            search_path: "/software/search".to_string(),
            winner_token: "is:winner".to_string(),
            collection_field: "software".to_string(),
            winner_field: "winner".to_string(),
            strategies: Vec::new(),
            probe_selectors: Vec::new(),
        })
    }
}

/// Knobs for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Highest page number requested per query.
    pub max_pages: u32,
    /// Pause between successive page requests of a query.
    pub delay: Duration,
    /// Restrict results to contest winners.
    pub winners_only: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            max_pages: 100,
            delay: Duration::from_millis(500),
            winners_only: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_profile_parses() {
        let profile: SiteProfile = serde_json::from_str(DEFAULT_PROFILE_JSON).unwrap();
        profile.validate().unwrap();
        assert_eq!(profile.collection_field, "software");
        assert_eq!(profile.strategies.len(), 4);
        assert_eq!(profile.strategies[0].container, ".software-result");
        assert_eq!(profile, SiteProfile::default());
    }

    #[test]
    fn test_search_url_and_query() {
        let profile = SiteProfile::default();
        assert_eq!(
            profile.search_url().unwrap(),
            "https://devpost.com/software/search"
        );
        assert_eq!(profile.search_query("ai", true), "is:winner ai");
        assert_eq!(profile.search_query("", true), "is:winner");
        assert_eq!(profile.search_query(" bot ", false), "bot");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let profile = SiteProfile::default().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(profile.base_url, "http://127.0.0.1:8080");
        assert_eq!(
            profile.search_url().unwrap(),
            "http://127.0.0.1:8080/software/search"
        );
    }

    #[test]
    fn test_profile_file_requires_strategies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let mut profile = SiteProfile::default();
        profile.strategies.clear();
        std::fs::write(&path, serde_json::to_string(&profile).unwrap()).unwrap();

        let err = SiteProfile::from_file(&path).unwrap_err();
        assert!(matches!(err, ScoutError::Profile(_)));
    }

    #[test]
    fn test_profile_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let profile = SiteProfile::default().with_base_url("https://example.org");
        std::fs::write(&path, serde_json::to_string_pretty(&profile).unwrap()).unwrap();
        assert_eq!(SiteProfile::from_file(&path).unwrap(), profile);
    }

    #[test]
    fn test_default_settings() {
        let s = ScrapeSettings::default();
        assert_eq!(s.max_pages, 100);
        assert!(s.winners_only);
        assert_eq!(s.timeout, Duration::from_secs(30));
    }
}
