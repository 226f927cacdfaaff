// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! `devpost-scout scrape [QUERIES...]` — multi-query pass over the search
//! endpoint, saving every unique project plus the agent-related subset.

use crate::acquisition::http_client::HttpClient;
use crate::cli::output::{self, Styled};
use crate::cli::progress_view::ProgressView;
use crate::cli::SiteArgs;
use crate::crawl::pipeline::Pipeline;
use crate::progress::new_run_id;
use crate::records::classify::KeywordSet;
use crate::records::store;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::info;

/// Queries used when none are given on the command line.
pub const DEFAULT_QUERIES: &[&str] = &[
    "ai",
    "machine learning",
    "artificial intelligence",
    "chatbot",
    "automation",
    "bot",
];

pub const DEFAULT_ALL_OUT: &str = "all_projects_comprehensive.json";
pub const DEFAULT_AGENTS_OUT: &str = "ai_agents_comprehensive.json";

/// Options of one `scrape` invocation.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub queries: Vec<String>,
    pub max_pages: u32,
    pub delay_ms: u64,
    pub all_out: String,
    pub agents_out: String,
    pub full_keywords: bool,
}

/// The query list to run: the given ones, or the defaults when empty.
pub fn effective_queries(queries: &[String]) -> Vec<String> {
    if queries.is_empty() {
        DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect()
    } else {
        queries.to_vec()
    }
}

/// Run the scrape command.
pub async fn run(opts: &ScrapeOptions, site: &SiteArgs) -> Result<()> {
    let profile = site.load_profile()?;
    let settings = site.settings(opts.max_pages, opts.delay_ms);
    let queries = effective_queries(&opts.queries);
    let keywords = if opts.full_keywords {
        KeywordSet::agent_default()
    } else {
        KeywordSet::agent_core()
    };

    let client = HttpClient::from_settings(&settings).context("failed to build HTTP client")?;
    let pipeline = Pipeline::new(&client, &profile, &settings).context("invalid site profile")?;

    let s = Styled::new();
    if !output::is_quiet() {
        eprintln!(
            "  Scraping {} quer{} from {}",
            queries.len(),
            if queries.len() == 1 { "y" } else { "ies" },
            profile.base_url
        );
    }

    let (mut emitter, view) = ProgressView::start(&new_run_id(Utc::now()));
    let report = pipeline.run(queries.as_slice(), &mut emitter).await;
    drop(emitter);
    view.finish().await;
    let report = report?;

    let agents = report.matching(&keywords);
    let all_out = Path::new(&opts.all_out);
    let agents_out = Path::new(&opts.agents_out);
    store::save(&report.records, all_out)
        .with_context(|| format!("failed to save {}", all_out.display()))?;
    store::save(&agents, agents_out)
        .with_context(|| format!("failed to save {}", agents_out.display()))?;
    info!(
        "saved {} projects to {} and {} agent projects to {}",
        report.records.len(),
        all_out.display(),
        agents.len(),
        agents_out.display()
    );

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "queries": report.queries,
            "total_unique": report.records.len(),
            "agent_matches": agents.len(),
            "all_out": opts.all_out,
            "agents_out": opts.agents_out,
            "started_at": report.started_at,
            "finished_at": report.finished_at,
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!();
        for failed in report.failed_queries() {
            eprintln!("  {} '{}' stopped early: {}", s.warn_sym(), failed.query, failed.stop);
        }
        eprintln!(
            "  {} Total unique projects: {}",
            s.ok_sym(),
            s.bold(&report.records.len().to_string())
        );
        eprintln!(
            "  {} AI agent projects: {}",
            s.ok_sym(),
            s.bold(&agents.len().to_string())
        );
        eprintln!("    Saved to {} and {}", opts.all_out, opts.agents_out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_queries_default() {
        let q = effective_queries(&[]);
        assert_eq!(q.len(), 6);
        assert_eq!(q[0], "ai");
        assert_eq!(q[5], "bot");
    }

    #[test]
    fn test_effective_queries_explicit() {
        let q = effective_queries(&["rag".to_string()]);
        assert_eq!(q, vec!["rag".to_string()]);
    }
}
