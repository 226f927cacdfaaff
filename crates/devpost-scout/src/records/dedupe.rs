// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Order-preserving deduplication keyed by canonical URL.
//!
//! `RecordSet` is a running accumulator: records from successive pages and
//! queries are pushed in as they arrive, the first record seen for a URL is
//! kept, and later duplicates are dropped without rescanning the list.

use super::types::ProjectRecord;
use std::collections::HashMap;

/// Insertion-ordered set of records, unique by `url`.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<ProjectRecord>,
    /// url → position in `records`.
    index: HashMap<String, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its URL is already present.
    ///
    /// Returns `true` when the record was new.
    pub fn insert(&mut self, record: ProjectRecord) -> bool {
        if self.index.contains_key(&record.url) {
            return false;
        }
        self.index.insert(record.url.clone(), self.records.len());
        self.records.push(record);
        true
    }

    /// Insert every record in order. Returns how many were new.
    pub fn extend<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = ProjectRecord>,
    {
        records
            .into_iter()
            .map(|r| self.insert(r))
            .filter(|added| *added)
            .count()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&ProjectRecord> {
        self.index.get(url).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_vec(self) -> Vec<ProjectRecord> {
        self.records
    }
}

impl FromIterator<ProjectRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = ProjectRecord>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        set.extend(iter);
        set
    }
}

/// One-shot form: keep the first occurrence of each URL, in input order.
pub fn dedupe(records: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
    records.into_iter().collect::<RecordSet>().into_vec()
}
