// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Turn one raw search response into project records.

use super::markup::MarkupExtractor;
use super::payload::{self, JsonLayout, PayloadKind};
use crate::config::SiteProfile;
use crate::error::ScoutResult;
use crate::records::types::ProjectRecord;
use url::Url;

/// Records from one page plus how they were found.
#[derive(Debug, Clone)]
pub struct NormalizedPage {
    pub kind: PayloadKind,
    /// Markup strategy that matched, if the page was markup.
    pub strategy: Option<String>,
    pub records: Vec<ProjectRecord>,
}

/// Dispatches a response body to the JSON or markup extractor.
#[derive(Debug, Clone)]
pub struct Normalizer {
    base: Url,
    collection_field: String,
    winner_field: String,
    winners_only: bool,
    markup: MarkupExtractor,
}

impl Normalizer {
    pub fn new(profile: &SiteProfile, winners_only: bool) -> ScoutResult<Self> {
        Ok(Self {
            base: Url::parse(&profile.base_url)?,
            collection_field: profile.collection_field.clone(),
            winner_field: profile.winner_field.clone(),
            winners_only,
            markup: MarkupExtractor::new(&profile.strategies)?,
        })
    }

    /// Normalize a response body. An empty record list is a valid result and
    /// means the listing has run out.
    pub fn normalize(&self, body: &str, content_type: Option<&str>) -> ScoutResult<NormalizedPage> {
        let kind = PayloadKind::detect(content_type);
        match kind {
            PayloadKind::Json => {
                let layout = JsonLayout {
                    collection_field: &self.collection_field,
                    winner_field: &self.winner_field,
                    winners_only: self.winners_only,
                };
                let records = payload::extract_json(body, &layout, &self.base)?;
                Ok(NormalizedPage {
                    kind,
                    strategy: None,
                    records,
                })
            }
            PayloadKind::Markup => {
                let page = self.markup.extract(body, &self.base);
                Ok(NormalizedPage {
                    kind,
                    strategy: page.strategy,
                    records: page.records,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(winners_only: bool) -> Normalizer {
        Normalizer::new(&SiteProfile::default(), winners_only).unwrap()
    }

    #[test]
    fn test_json_dispatch() {
        let body = r#"{"software": [
            {"name": "X", "url": "/u", "winner": true, "tagline": "t"},
            {"name": "Y", "url": "/v", "winner": false}
        ]}"#;
        let page = normalizer(true)
            .normalize(body, Some("application/json"))
            .unwrap();
        assert_eq!(page.kind, PayloadKind::Json);
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].title, "X");
    }

    #[test]
    fn test_markup_dispatch() {
        let body = r#"<div class="gallery-item"><a href="/software/g"><h5>G</h5></a></div>"#;
        let page = normalizer(true)
            .normalize(body, Some("text/html; charset=utf-8"))
            .unwrap();
        assert_eq!(page.kind, PayloadKind::Markup);
        assert_eq!(page.strategy.as_deref(), Some("gallery-item"));
        assert_eq!(page.records[0].url, "https://devpost.com/software/g");
    }

    #[test]
    fn test_json_body_with_html_content_type_reads_as_markup() {
        let page = normalizer(true)
            .normalize(r#"{"software": []}"#, Some("text/html"))
            .unwrap();
        assert_eq!(page.kind, PayloadKind::Markup);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_custom_base_resolves_links() {
        let profile = SiteProfile::default().with_base_url("http://localhost:9000");
        let n = Normalizer::new(&profile, false).unwrap();
        let page = n
            .normalize(
                r#"{"software": [{"name": "L", "url": "/software/l"}]}"#,
                Some("application/json"),
            )
            .unwrap();
        assert_eq!(page.records[0].url, "http://localhost:9000/software/l");
    }
}
