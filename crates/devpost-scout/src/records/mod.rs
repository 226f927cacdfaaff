// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Project records and the operations applied to a collected set of them:
//! deduplication, keyword classification and persistence.

pub mod classify;
pub mod dedupe;
pub mod store;
pub mod types;

pub use types::ProjectRecord;
