// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! `devpost-scout filter [INPUT] [OUTPUT]` — reclassify a saved project file.

use crate::cli::output::{self, Styled};
use crate::records::classify::{filter_matching, KeywordSet};
use crate::records::store;
use anyhow::{Context, Result};
use std::path::Path;

pub const DEFAULT_INPUT: &str = "devpost_projects_all.json";
pub const DEFAULT_OUTPUT: &str = "ai_agents_projects.json";

/// Number of matches echoed to the terminal.
const PREVIEW: usize = 10;

/// Run the filter command.
pub async fn run(input: &str, output_path: &str) -> Result<()> {
    let input_path = Path::new(input);
    let records = store::load(input_path)
        .with_context(|| format!("failed to load {}", input_path.display()))?;

    let keywords = KeywordSet::agent_default();
    let matches = filter_matching(&records, &keywords);

    let out = Path::new(output_path);
    store::save(&matches, out).with_context(|| format!("failed to save {}", out.display()))?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "input": input,
            "output": output_path,
            "total": records.len(),
            "matches": matches.len(),
        }));
        return Ok(());
    }

    let s = Styled::new();
    println!("Total projects: {}", records.len());
    println!("AI agent projects: {}", matches.len());
    if !output::is_quiet() {
        eprintln!("  {} Saved to {output_path}", s.ok_sym());
    }

    for record in matches.iter().take(PREVIEW) {
        println!("\n{}", s.bold(&record.title));
        println!("  {}", record.tagline);
        println!("  {}", s.dim(&record.url));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::types::ProjectRecord;

    #[tokio::test]
    async fn test_filter_writes_matches_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        let records = vec![
            ProjectRecord::from_markup(
                "HelperBot".to_string(),
                "https://devpost.com/software/helperbot".to_string(),
                Some("An AI agent for your inbox".to_string()),
            ),
            ProjectRecord::from_markup(
                "Garden Map".to_string(),
                "https://devpost.com/software/garden-map".to_string(),
                Some("Plot your vegetables".to_string()),
            ),
        ];
        store::save(&records, &input).unwrap();

        run(input.to_str().unwrap(), output.to_str().unwrap())
            .await
            .unwrap();

        let saved = store::load(&output).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "HelperBot");
    }

    #[tokio::test]
    async fn test_filter_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.json");
        let output = dir.path().join("out.json");
        let err = run(input.to_str().unwrap(), output.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to load"));
        assert!(!output.exists());
    }
}
