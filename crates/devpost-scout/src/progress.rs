// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress event types and broadcast channel for scrape telemetry.
//!
//! The paginator and pipeline emit `ProgressEvent`s as pages and queries
//! complete. Events flow through a `tokio::sync::broadcast` channel to
//! whoever is listening (the CLI spinner, JSON line output). When no
//! subscriber exists, events are silently dropped.

use crate::acquisition::payload::PayloadKind;
use crate::crawl::paginator::StopReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A progress event emitted during a scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// The run this event belongs to.
    pub run_id: String,
    /// Monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock time of emission.
    pub at: DateTime<Utc>,
    /// The kind of progress event.
    pub event: ProgressEventKind,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressEventKind {
    /// A query's pagination has begun.
    QueryStarted {
        query: String,
        /// 1-based position in the query list.
        position: usize,
        total: usize,
    },
    /// A page was fetched and normalized.
    PageFetched {
        query: String,
        page: u32,
        status: u16,
        payload: String,
        records: usize,
    },
    /// A query's pagination ended.
    QueryStopped {
        query: String,
        pages_fetched: u32,
        records: usize,
        reason: StopReason,
    },
    /// A query's records were merged into the running unique set.
    Merged {
        query: String,
        new_unique: usize,
        total_unique: usize,
    },
    /// All queries finished.
    RunComplete {
        queries: usize,
        total_unique: usize,
        elapsed_ms: u64,
    },
    /// A non-fatal warning occurred.
    Warning { message: String },
}

impl ProgressEventKind {
    pub fn page_fetched(
        query: &str,
        page: u32,
        status: u16,
        kind: PayloadKind,
        records: usize,
    ) -> Self {
        Self::PageFetched {
            query: query.to_string(),
            page,
            status,
            payload: kind.to_string(),
            records,
        }
    }
}

/// Sender handle for emitting progress events.
///
/// Backed by a `tokio::sync::broadcast` channel so multiple listeners can
/// subscribe independently. When no listeners exist, `send()` returns an error
/// which we silently ignore.
pub type ProgressSender = tokio::sync::broadcast::Sender<ProgressEvent>;

/// Receiver handle for consuming progress events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ProgressEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(256)
}

/// Run identifier derived from the start time, e.g. `run-20261016T093000`.
pub fn new_run_id(started: DateTime<Utc>) -> String {
    format!("run-{}", started.format("%Y%m%dT%H%M%S"))
}

/// Stamps events with the run id and sequence number before sending.
#[derive(Debug, Clone)]
pub struct ProgressEmitter {
    tx: Option<ProgressSender>,
    run_id: String,
    seq: u64,
}

impl ProgressEmitter {
    pub fn new(tx: Option<ProgressSender>, run_id: impl Into<String>) -> Self {
        Self {
            tx,
            run_id: run_id.into(),
            seq: 0,
        }
    }

    /// An emitter with no channel; every emit is a no-op.
    pub fn silent() -> Self {
        Self::new(None, "silent")
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Emit an event, ignoring send errors (no receivers).
    pub fn emit(&mut self, event: ProgressEventKind) {
        if let Some(ref sender) = self.tx {
            self.seq += 1;
            let _ = sender.send(ProgressEvent {
                run_id: self.run_id.clone(),
                seq: self.seq,
                at: Utc::now(),
                event,
            });
        }
    }
}
