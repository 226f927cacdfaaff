// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Output mode flags and terminal styling shared by all commands.
//!
//! `main` sets the global flags once from the parsed CLI; commands query
//! them to decide between human-readable and JSON output.

use std::sync::atomic::{AtomicBool, Ordering};

static JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static NO_COLOR: AtomicBool = AtomicBool::new(false);

/// Record the global output flags.
pub fn init(json: bool, quiet: bool, verbose: bool, no_color: bool) {
    JSON.store(json, Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
    VERBOSE.store(verbose, Ordering::Relaxed);
    NO_COLOR.store(no_color, Ordering::Relaxed);
}

/// Machine-readable output requested.
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Human-readable chatter suppressed. JSON mode implies quiet so stdout
/// carries only the JSON document.
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed) || is_json()
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a JSON value to stdout, pretty-printed.
pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: failed to render JSON: {e}"),
    }
}

/// ANSI styling that switches itself off with `--no-color`.
#[derive(Debug, Clone, Copy)]
pub struct Styled {
    color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            color: !NO_COLOR.load(Ordering::Relaxed),
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn ok_sym(&self) -> String {
        self.paint("32", "✓")
    }

    pub fn warn_sym(&self) -> String {
        self.paint("33", "!")
    }

    pub fn err_sym(&self) -> String {
        self.paint("31", "✗")
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_styling() {
        let s = Styled { color: false };
        assert_eq!(s.ok_sym(), "✓");
        assert_eq!(s.bold("x"), "x");
    }

    #[test]
    fn test_colored_styling() {
        let s = Styled { color: true };
        assert_eq!(s.warn_sym(), "\x1b[33m!\x1b[0m");
    }
}
