// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-query pagination state machine.
//!
//! Pages are requested one at a time starting at 1. Each page is fetched,
//! normalized and accumulated. Pagination ends on the first non-success
//! response or transport failure, on the first page that yields no records,
//! or after `max_pages`. Records from pages before the stopping page are
//! always kept.

use crate::acquisition::http_client::{FetchRequest, Fetcher};
use crate::acquisition::normalizer::Normalizer;
use crate::config::{ScrapeSettings, SiteProfile};
use crate::error::ScoutResult;
use crate::progress::{ProgressEmitter, ProgressEventKind};
use crate::records::types::ProjectRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Why a query stopped paginating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopReason {
    /// The server answered with a non-success status.
    Status { page: u32, status: u16 },
    /// The request never produced a response.
    Transport { page: u32, message: String },
    /// A JSON response could not be read.
    Malformed { page: u32, message: String },
    /// A page produced zero records.
    Empty { page: u32 },
    /// The page cap was reached.
    Cap { pages: u32 },
}

impl StopReason {
    /// Whether the stop came from a fault rather than running out of pages.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Transport { .. } | Self::Malformed { .. }
        )
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { page, status } => write!(f, "HTTP {status} on page {page}"),
            Self::Transport { page, message } => {
                write!(f, "request failed on page {page}: {message}")
            }
            Self::Malformed { page, message } => {
                write!(f, "unreadable payload on page {page}: {message}")
            }
            Self::Empty { page } => write!(f, "no more projects on page {page}"),
            Self::Cap { pages } => write!(f, "reached page cap after {pages} pages"),
        }
    }
}

/// Where a paginator is in its run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationState {
    /// `page` is the next page to request.
    Running { page: u32 },
    StoppedByError(StopReason),
    StoppedByEmpty { page: u32 },
    StoppedByCap { pages: u32 },
    /// The outcome has been handed to the caller.
    Done,
}

impl PaginationState {
    fn stopped(reason: &StopReason) -> Self {
        match reason {
            StopReason::Empty { page } => Self::StoppedByEmpty { page: *page },
            StopReason::Cap { pages } => Self::StoppedByCap { pages: *pages },
            other => Self::StoppedByError(other.clone()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Everything one query produced.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub query: String,
    pub records: Vec<ProjectRecord>,
    /// Pages that returned a success status.
    pub pages_fetched: u32,
    pub stop: StopReason,
}

/// Drives the fetcher across the pages of one query.
pub struct Paginator<'a> {
    fetcher: &'a dyn Fetcher,
    normalizer: &'a Normalizer,
    endpoint: String,
    query: String,
    search_text: String,
    max_pages: u32,
    delay: Duration,
    state: PaginationState,
    stop: Option<StopReason>,
    records: Vec<ProjectRecord>,
    pages_fetched: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        normalizer: &'a Normalizer,
        profile: &SiteProfile,
        settings: &ScrapeSettings,
        query: &str,
    ) -> ScoutResult<Self> {
        let mut paginator = Self {
            fetcher,
            normalizer,
            endpoint: profile.search_url()?,
            query: query.to_string(),
            search_text: profile.search_query(query, settings.winners_only),
            max_pages: settings.max_pages,
            delay: settings.delay,
            state: PaginationState::Running { page: 1 },
            stop: None,
            records: Vec::new(),
            pages_fetched: 0,
        };
        if settings.max_pages == 0 {
            paginator.halt(StopReason::Cap { pages: 0 });
        }
        Ok(paginator)
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Records accumulated so far.
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Request, normalize and accumulate the next page.
    ///
    /// Does nothing unless the paginator is running.
    pub async fn step(&mut self, progress: &mut ProgressEmitter) -> &PaginationState {
        let page = match self.state {
            PaginationState::Running { page } => page,
            _ => return &self.state,
        };

        if page > 1 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let request = FetchRequest::get(&self.endpoint)
            .param("query", &self.search_text)
            .param("page", page);
        debug!("query '{}': requesting page {page}", self.query);

        let resp = match self.fetcher.fetch(&request).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("query '{}': page {page} request failed: {e}", self.query);
                self.halt(StopReason::Transport {
                    page,
                    message: e.to_string(),
                });
                return &self.state;
            }
        };

        if !resp.is_success() {
            warn!(
                "query '{}': page {page} returned HTTP {}",
                self.query, resp.status
            );
            self.halt(StopReason::Status {
                page,
                status: resp.status,
            });
            return &self.state;
        }
        self.pages_fetched += 1;

        let normalized = match self
            .normalizer
            .normalize(&resp.body, resp.content_type.as_deref())
        {
            Ok(n) => n,
            Err(e) => {
                warn!("query '{}': page {page} could not be read: {e}", self.query);
                progress.emit(ProgressEventKind::Warning {
                    message: format!("query '{}' page {page}: {e}", self.query),
                });
                self.halt(StopReason::Malformed {
                    page,
                    message: e.to_string(),
                });
                return &self.state;
            }
        };

        let found = normalized.records.len();
        progress.emit(ProgressEventKind::page_fetched(
            &self.query,
            page,
            resp.status,
            normalized.kind,
            found,
        ));

        if found == 0 {
            info!("query '{}': no more projects on page {page}", self.query);
            self.halt(StopReason::Empty { page });
            return &self.state;
        }

        debug!("query '{}': page {page} yielded {found} records", self.query);
        self.records.extend(normalized.records);

        if page >= self.max_pages {
            self.halt(StopReason::Cap { pages: page });
        } else {
            self.state = PaginationState::Running { page: page + 1 };
        }
        &self.state
    }

    /// Take the outcome once pagination has stopped. Moves to `Done`.
    pub fn finish(&mut self) -> Option<QueryOutcome> {
        if self.state.is_running() || self.state == PaginationState::Done {
            return None;
        }
        let stop = self.stop.clone()?;
        self.state = PaginationState::Done;
        Some(QueryOutcome {
            query: self.query.clone(),
            records: std::mem::take(&mut self.records),
            pages_fetched: self.pages_fetched,
            stop,
        })
    }

    /// Step until stopped and return the outcome.
    pub async fn run(mut self, progress: &mut ProgressEmitter) -> QueryOutcome {
        while self.state.is_running() {
            self.step(progress).await;
        }
        let fallback_stop = StopReason::Cap {
            pages: self.pages_fetched,
        };
        match self.finish() {
            Some(outcome) => outcome,
            None => QueryOutcome {
                query: self.query,
                records: Vec::new(),
                pages_fetched: self.pages_fetched,
                stop: self.stop.unwrap_or(fallback_stop),
            },
        }
    }

    fn halt(&mut self, reason: StopReason) {
        self.state = PaginationState::stopped(&reason);
        self.stop = Some(reason);
    }
}
