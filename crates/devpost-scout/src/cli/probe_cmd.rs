// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! `devpost-scout probe [QUERY]` — fetch one search page and report which
//! selectors match, to diagnose layout changes.

use crate::acquisition::http_client::{FetchRequest, Fetcher, HttpClient};
use crate::acquisition::markup::{sample_links, selector_counts, MarkupExtractor};
use crate::cli::output::{self, Styled};
use crate::cli::SiteArgs;
use crate::config::SiteProfile;
use crate::records::store;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use url::Url;

pub const DEFAULT_QUERY: &str = "ai agents";
pub const DEFAULT_DUMP: &str = "devpost_page.html";

const SAMPLE_LINKS: usize = 3;
const LINK_TEXT_CHARS: usize = 50;

/// Selector diagnostics for one fetched page.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub url: String,
    pub status: u16,
    /// `(selector, match count)` for every strategy container, then every
    /// probe selector.
    pub selectors: Vec<(String, usize)>,
    /// `(absolute href, link text)` of the first project links.
    pub links: Vec<(String, String)>,
}

/// Analyse a page body against the profile's selectors.
pub fn inspect(profile: &SiteProfile, url: &str, status: u16, body: &str) -> Result<ProbeReport> {
    let base = Url::parse(&profile.base_url)
        .with_context(|| format!("invalid base url {}", profile.base_url))?;
    let extractor = MarkupExtractor::new(&profile.strategies)?;

    let mut selectors: Vec<(String, usize)> = profile
        .strategies
        .iter()
        .map(|s| s.container.clone())
        .zip(extractor.container_counts(body).into_iter().map(|(_, n)| n))
        .collect();
    selectors.extend(selector_counts(body, &profile.probe_selectors)?);

    let links = match profile.strategies.first() {
        Some(first) => sample_links(body, &first.link, &base, SAMPLE_LINKS)?
            .into_iter()
            .map(|(href, text)| (href, truncate_chars(&text, LINK_TEXT_CHARS)))
            .collect(),
        None => Vec::new(),
    };

    Ok(ProbeReport {
        url: url.to_string(),
        status,
        selectors,
        links,
    })
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Run the probe command.
pub async fn run(query: &str, dump: &str, site: &SiteArgs) -> Result<()> {
    let profile = site.load_profile()?;
    let settings = site.settings(1, 0);
    let client = HttpClient::from_settings(&settings).context("failed to build HTTP client")?;

    let endpoint = profile.search_url()?;
    let request = FetchRequest::get(&endpoint)
        .param("query", profile.search_query(query, settings.winners_only));
    let response = client
        .fetch(&request)
        .await
        .with_context(|| format!("failed to fetch {endpoint}"))?;

    let s = Styled::new();
    if !response.is_success() {
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "url": response.final_url,
                "status": response.status,
                "error": "fetch_failed",
            }));
        } else {
            println!("Status code: {}", response.status);
            println!("{} Failed to fetch page: {}", s.err_sym(), response.status);
        }
        return Ok(());
    }

    let report = inspect(&profile, &response.final_url, response.status, &response.body)?;
    let dump_path = Path::new(dump);
    store::dump_markup(&response.body, dump_path)
        .with_context(|| format!("failed to write {}", dump_path.display()))?;

    if output::is_json() {
        let mut value = serde_json::to_value(&report)?;
        value["dump"] = serde_json::json!(dump);
        output::print_json(&value);
        return Ok(());
    }

    println!("Status code: {}", report.status);
    for (selector, count) in &report.selectors {
        println!("{selector}: {count} items");
    }
    for (i, (href, text)) in report.links.iter().enumerate() {
        println!("Link {}: {href} - {text}", i + 1);
    }
    println!("{} HTML saved to {dump}", s.ok_sym());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <div class="gallery-item">
            <a href="/software/alpha"><h5>Alpha</h5></a>
        </div>
        <div class="gallery-item">
            <a href="/software/beta">
                <h5>A very long project name that keeps going well past fifty characters</h5>
            </a>
        </div>
        <div class="project-card">
            <a href="https://devpost.com/software/gamma"><h3>Gamma</h3></a>
        </div>
    </body></html>"#;

    #[test]
    fn test_inspect_counts_selectors() {
        let profile = SiteProfile::default();
        let report = inspect(&profile, "https://devpost.com/software/search", 200, PAGE).unwrap();

        let counts: Vec<(&str, usize)> = report
            .selectors
            .iter()
            .map(|(s, n)| (s.as_str(), *n))
            .collect();
        assert_eq!(
            counts,
            vec![
                (".software-result", 0),
                (".project-card", 1),
                (".gallery-item", 2),
                (".software-list-item", 0),
                ("[class*=\"software\"]", 0),
                ("[class*=\"project\"]", 1),
                ("a[href*=\"/software/\"]", 3),
            ]
        );
    }

    #[test]
    fn test_inspect_samples_links() {
        let profile = SiteProfile::default();
        let report = inspect(&profile, "https://devpost.com/software/search", 200, PAGE).unwrap();

        assert_eq!(report.links.len(), 3);
        assert_eq!(report.links[0].0, "https://devpost.com/software/alpha");
        assert_eq!(report.links[0].1, "Alpha");
        assert_eq!(report.links[1].1.chars().count(), 50);
        assert_eq!(report.links[2].0, "https://devpost.com/software/gamma");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ok", 50), "ok");
    }
}
