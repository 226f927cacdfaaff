// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering of scrape progress events.

use crate::cli::output::{self, Styled};
use crate::progress::{self, ProgressEmitter, ProgressEvent, ProgressEventKind, ProgressReceiver};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Listener task rendering events until the emitter is dropped.
pub struct ProgressView {
    handle: Option<JoinHandle<()>>,
}

impl ProgressView {
    /// Create an emitter for `run_id` and a listener for it. With `--json`
    /// events go to stderr as JSON lines; otherwise a spinner draws
    /// per-query summary lines. `--quiet` gets no listener at all.
    pub fn start(run_id: &str) -> (ProgressEmitter, ProgressView) {
        let json = output::is_json();
        if output::is_quiet() && !json {
            return (ProgressEmitter::new(None, run_id), ProgressView { handle: None });
        }
        let (tx, rx) = progress::channel();
        let handle = if json {
            tokio::spawn(json_lines(rx))
        } else {
            tokio::spawn(render(rx))
        };
        (
            ProgressEmitter::new(Some(tx), run_id),
            ProgressView {
                handle: Some(handle),
            },
        )
    }

    /// Wait for the listener to drain. Drop the emitter first.
    pub async fn finish(self) {
        if let Some(handle) = self.handle {
            let _ = handle.await;
        }
    }
}

async fn render(mut rx: ProgressReceiver) {
    let s = Styled::new();
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    loop {
        match rx.recv().await {
            Ok(event) => draw(&pb, &s, &event),
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
    pb.finish_and_clear();
}

async fn json_lines(mut rx: ProgressReceiver) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Ok(line) = serde_json::to_string(&event) {
                    eprintln!("{line}");
                }
            }
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
}

fn draw(pb: &ProgressBar, s: &Styled, event: &ProgressEvent) {
    match &event.event {
        ProgressEventKind::QueryStarted {
            query,
            position,
            total,
        } => {
            pb.println(format!(
                "\n  {} {}",
                s.bold(&format!("[{position}/{total}]")),
                s.bold(&format!("Searching for: {query}"))
            ));
            pb.set_message(format!("'{query}' page 1..."));
        }
        ProgressEventKind::PageFetched {
            query,
            page,
            records,
            payload,
            ..
        } => {
            if output::is_verbose() {
                pb.println(format!("    page {page}: {records} projects ({payload})"));
            }
            pb.set_message(format!("'{query}' page {}...", page + 1));
        }
        ProgressEventKind::QueryStopped {
            query,
            records,
            reason,
            ..
        } => {
            let sym = if reason.is_error() {
                s.warn_sym()
            } else {
                s.ok_sym()
            };
            pb.println(format!(
                "  {sym} Found {records} projects for '{query}' {}",
                s.dim(&format!("({reason})"))
            ));
        }
        ProgressEventKind::Merged { total_unique, .. } => {
            pb.println(format!("    Total unique projects so far: {total_unique}"));
        }
        ProgressEventKind::RunComplete { elapsed_ms, .. } => {
            pb.set_message(format!("done in {:.1}s", *elapsed_ms as f64 / 1000.0));
        }
        ProgressEventKind::Warning { message } => {
            pb.println(format!("  {} {message}", s.warn_sym()));
        }
    }
}
