// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Paginated crawling of the search endpoint.

pub mod paginator;
pub mod pipeline;
