// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Multi-query scrape driver.
//!
//! Queries run strictly one after another. Each query's records are merged
//! into a single running `RecordSet` as soon as the query stops, so the
//! unique total is known after every query. A query that stops on a fault
//! does not prevent the remaining queries from running.

use super::paginator::{Paginator, StopReason};
use crate::acquisition::http_client::Fetcher;
use crate::acquisition::normalizer::Normalizer;
use crate::config::{ScrapeSettings, SiteProfile};
use crate::error::ScoutResult;
use crate::progress::{ProgressEmitter, ProgressEventKind};
use crate::records::classify::{filter_matching, KeywordSet};
use crate::records::dedupe::RecordSet;
use crate::records::types::ProjectRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Per-query line of the run report.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySummary {
    pub query: String,
    pub pages_fetched: u32,
    /// Records the query produced, duplicates included.
    pub records_found: usize,
    /// Records that were not already known from earlier queries.
    pub new_unique: usize,
    pub stop: StopReason,
}

/// Result of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub queries: Vec<QuerySummary>,
    /// Unique records in first-seen order.
    #[serde(skip)]
    pub records: Vec<ProjectRecord>,
}

impl ScrapeReport {
    /// Records matching `keywords`, in first-seen order.
    pub fn matching(&self, keywords: &KeywordSet) -> Vec<ProjectRecord> {
        filter_matching(&self.records, keywords)
    }

    /// Queries that stopped because of a fault.
    pub fn failed_queries(&self) -> impl Iterator<Item = &QuerySummary> {
        self.queries.iter().filter(|q| q.stop.is_error())
    }
}

/// Runs the paginator for each query and merges the results.
pub struct Pipeline<'a> {
    fetcher: &'a dyn Fetcher,
    profile: &'a SiteProfile,
    settings: &'a ScrapeSettings,
    normalizer: Normalizer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        profile: &'a SiteProfile,
        settings: &'a ScrapeSettings,
    ) -> ScoutResult<Self> {
        Ok(Self {
            fetcher,
            profile,
            settings,
            normalizer: Normalizer::new(profile, settings.winners_only)?,
        })
    }

    /// Scrape every query in order and return the merged, deduplicated set.
    pub async fn run<S: AsRef<str>>(
        &self,
        queries: &[S],
        progress: &mut ProgressEmitter,
    ) -> ScoutResult<ScrapeReport> {
        let started_at = Utc::now();
        let mut unique = RecordSet::new();
        let mut summaries = Vec::with_capacity(queries.len());

        for (i, query) in queries.iter().enumerate() {
            let query = query.as_ref();
            info!("searching for '{query}' ({}/{})", i + 1, queries.len());
            progress.emit(ProgressEventKind::QueryStarted {
                query: query.to_string(),
                position: i + 1,
                total: queries.len(),
            });

            let paginator = Paginator::new(
                self.fetcher,
                &self.normalizer,
                self.profile,
                self.settings,
                query,
            )?;
            let outcome = paginator.run(progress).await;
            let records_found = outcome.records.len();

            progress.emit(ProgressEventKind::QueryStopped {
                query: query.to_string(),
                pages_fetched: outcome.pages_fetched,
                records: records_found,
                reason: outcome.stop.clone(),
            });

            let new_unique = unique.extend(outcome.records);
            info!(
                "'{query}': {records_found} projects, {new_unique} new, {} unique so far ({})",
                unique.len(),
                outcome.stop
            );
            progress.emit(ProgressEventKind::Merged {
                query: query.to_string(),
                new_unique,
                total_unique: unique.len(),
            });

            summaries.push(QuerySummary {
                query: query.to_string(),
                pages_fetched: outcome.pages_fetched,
                records_found,
                new_unique,
                stop: outcome.stop,
            });
        }

        let finished_at = Utc::now();
        let elapsed_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
        progress.emit(ProgressEventKind::RunComplete {
            queries: summaries.len(),
            total_unique: unique.len(),
            elapsed_ms,
        });

        Ok(ScrapeReport {
            started_at,
            finished_at,
            queries: summaries,
            records: unique.into_vec(),
        })
    }
}
