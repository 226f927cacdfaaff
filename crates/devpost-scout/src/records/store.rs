// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! JSON persistence for record collections.
//!
//! Documents are a pretty-printed JSON array with four-space indentation.
//! Non-ASCII text is written as-is. Saving replaces the target file
//! wholesale via a sibling temp file and a rename.

use super::types::ProjectRecord;
use crate::error::{ScoutError, ScoutResult};
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write `records` to `path`, overwriting any existing file.
pub fn save(records: &[ProjectRecord], path: &Path) -> ScoutResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = temp_path(path);
    let written = write_pretty(records, &tmp)
        .and_then(|()| fs::rename(&tmp, path).map_err(ScoutError::from));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    tracing::info!("saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read a document previously written by [`save`].
pub fn load(path: &Path) -> ScoutResult<Vec<ProjectRecord>> {
    let text = fs::read_to_string(path)?;
    let records: Vec<ProjectRecord> = serde_json::from_str(&text)?;
    tracing::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Write a raw response body verbatim, for inspecting the site's markup.
pub fn dump_markup(body: &str, path: &Path) -> ScoutResult<()> {
    fs::write(path, body)?;
    tracing::info!("dumped {} bytes of markup to {}", body.len(), path.display());
    Ok(())
}

fn write_pretty(records: &[ProjectRecord], path: &Path) -> ScoutResult<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut ser)?;
    writer.flush()?;
    Ok(())
}

/// `out.json` → `out.json.tmp` in the same directory, so the rename stays
/// on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let name = format!(
        "{}.tmp",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("records.json")
    );
    path.with_file_name(name)
}
