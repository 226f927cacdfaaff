// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! `devpost-scout search [QUERY]` — single-query pass saving the raw results.

use crate::acquisition::http_client::HttpClient;
use crate::cli::output::{self, Styled};
use crate::cli::progress_view::ProgressView;
use crate::cli::SiteArgs;
use crate::crawl::pipeline::Pipeline;
use crate::progress::new_run_id;
use crate::records::store;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

pub const DEFAULT_QUERY: &str = "ai agents";
pub const DEFAULT_OUT: &str = "devpost_projects.json";

/// Number of results echoed to the terminal.
const PREVIEW: usize = 5;

/// Run the search command.
pub async fn run(
    query: &str,
    max_pages: u32,
    delay_ms: u64,
    out: &str,
    site: &SiteArgs,
) -> Result<()> {
    let profile = site.load_profile()?;
    let settings = site.settings(max_pages, delay_ms);
    let client = HttpClient::from_settings(&settings).context("failed to build HTTP client")?;
    let pipeline = Pipeline::new(&client, &profile, &settings).context("invalid site profile")?;

    let (mut emitter, view) = ProgressView::start(&new_run_id(Utc::now()));
    let report = pipeline.run(&[query], &mut emitter).await;
    drop(emitter);
    view.finish().await;
    let report = report?;

    let path = Path::new(out);
    store::save(&report.records, path)
        .with_context(|| format!("failed to save {}", path.display()))?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "query": query,
            "count": report.records.len(),
            "out": out,
            "stop": report.queries.first().map(|q| &q.stop),
            "projects": report.records.iter().take(PREVIEW).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        let s = Styled::new();
        eprintln!(
            "\n  {} Found {} projects, saved to {out}",
            s.ok_sym(),
            report.records.len()
        );
    }
    for record in report.records.iter().take(PREVIEW) {
        println!("- {}: {}", record.title, record.url);
    }
    Ok(())
}
