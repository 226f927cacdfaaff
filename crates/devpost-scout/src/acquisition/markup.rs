// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Extract project entries from search-page markup.
//!
//! The site's markup is not a stable contract, so extraction runs an ordered
//! list of selector strategies and takes the first one that produces any
//! records. Each strategy names a container selector plus title, link and
//! tagline selectors scoped to the container.
//!
//! The `scraper` crate's `Html` is `!Send`; everything here is synchronous
//! and the parsed document never outlives a call.

use crate::config::SelectorStrategy;
use crate::error::{ScoutError, ScoutResult};
use crate::records::types::ProjectRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A selector strategy with its selectors parsed.
#[derive(Debug, Clone)]
pub struct CompiledStrategy {
    pub name: String,
    container: Selector,
    title: Selector,
    link: Selector,
    tagline: Selector,
}

impl CompiledStrategy {
    pub fn compile(strategy: &SelectorStrategy) -> ScoutResult<Self> {
        Ok(Self {
            name: strategy.name.clone(),
            container: parse_selector(&strategy.container)?,
            title: parse_selector(&strategy.title)?,
            link: parse_selector(&strategy.link)?,
            tagline: parse_selector(&strategy.tagline)?,
        })
    }

    /// Records found in `document` by this strategy alone.
    fn extract(&self, document: &Html, base: &Url) -> Vec<ProjectRecord> {
        document
            .select(&self.container)
            .filter_map(|item| self.extract_item(&item, base))
            .collect()
    }

    /// A container yields a record only when it has both a title and a link.
    fn extract_item(&self, item: &ElementRef<'_>, base: &Url) -> Option<ProjectRecord> {
        let title = item
            .select(&self.title)
            .next()
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())?;

        let href = item.select(&self.link).next()?.value().attr("href")?;
        let url = resolve_link(base, href)?;

        let tagline = item
            .select(&self.tagline)
            .next()
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty());

        Some(ProjectRecord::from_markup(title, url, tagline))
    }
}

/// Records pulled from one page, and the strategy that found them.
#[derive(Debug, Clone, Default)]
pub struct MarkupPage {
    pub strategy: Option<String>,
    pub records: Vec<ProjectRecord>,
}

/// Ordered set of compiled strategies.
#[derive(Debug, Clone)]
pub struct MarkupExtractor {
    strategies: Vec<CompiledStrategy>,
}

impl MarkupExtractor {
    pub fn new(strategies: &[SelectorStrategy]) -> ScoutResult<Self> {
        let strategies = strategies
            .iter()
            .map(CompiledStrategy::compile)
            .collect::<ScoutResult<Vec<_>>>()?;
        Ok(Self { strategies })
    }

    pub fn strategies(&self) -> &[CompiledStrategy] {
        &self.strategies
    }

    /// Run strategies in order until one yields records.
    pub fn extract(&self, html: &str, base: &Url) -> MarkupPage {
        let document = Html::parse_document(html);
        for strategy in &self.strategies {
            let records = strategy.extract(&document, base);
            if !records.is_empty() {
                tracing::debug!(
                    "markup strategy '{}' matched {} records",
                    strategy.name,
                    records.len()
                );
                return MarkupPage {
                    strategy: Some(strategy.name.clone()),
                    records,
                };
            }
        }
        MarkupPage::default()
    }

    /// Container match counts per strategy, for diagnostics.
    pub fn container_counts(&self, html: &str) -> Vec<(String, usize)> {
        let document = Html::parse_document(html);
        self.strategies
            .iter()
            .map(|s| (s.name.clone(), document.select(&s.container).count()))
            .collect()
    }
}

/// Count the elements matched by each selector. Invalid selectors are an error.
pub fn selector_counts(html: &str, selectors: &[String]) -> ScoutResult<Vec<(String, usize)>> {
    let document = Html::parse_document(html);
    selectors
        .iter()
        .map(|s| {
            let sel = parse_selector(s)?;
            Ok((s.clone(), document.select(&sel).count()))
        })
        .collect()
}

/// First `limit` links matching `selector`, as `(absolute href, text)`.
pub fn sample_links(
    html: &str,
    selector: &str,
    base: &Url,
    limit: usize,
) -> ScoutResult<Vec<(String, String)>> {
    let document = Html::parse_document(html);
    let sel = parse_selector(selector)?;
    Ok(document
        .select(&sel)
        .filter_map(|el| {
            let href = resolve_link(base, el.value().attr("href")?)?;
            Some((href, element_text(&el)))
        })
        .take(limit)
        .collect())
}

/// Resolve `href` against the site origin. Empty and fragment-only links
/// resolve to nothing.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    base.join(href).ok().map(|u| u.to_string())
}

fn parse_selector(selector: &str) -> ScoutResult<Selector> {
    Selector::parse(selector).map_err(|e| ScoutError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Visible text of an element with runs of whitespace collapsed.
fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteProfile;

    fn base() -> Url {
        Url::parse("https://devpost.com").unwrap()
    }

    fn extractor() -> MarkupExtractor {
        MarkupExtractor::new(&SiteProfile::default().strategies).unwrap()
    }

    #[test]
    fn test_extract_software_results() {
        let html = r#"
        <html><body>
          <div class="software-result">
            <a href="/software/agent-smith"><h5>  Agent
              Smith </h5></a>
            <p class="tagline">An autonomous helper</p>
          </div>
          <div class="software-result">
            <h3>Recipe Bot</h3>
            <a href="https://devpost.com/software/recipe-bot">view</a>
          </div>
        </body></html>
        "#;

        let page = extractor().extract(html, &base());
        assert_eq!(page.strategy.as_deref(), Some("software-result"));
        assert_eq!(page.records.len(), 2);

        let first = &page.records[0];
        assert_eq!(first.title, "Agent Smith");
        assert_eq!(first.url, "https://devpost.com/software/agent-smith");
        assert_eq!(first.tagline, "An autonomous helper");
        assert!(first.tags.is_none());

        let second = &page.records[1];
        assert_eq!(second.title, "Recipe Bot");
        assert_eq!(second.url, "https://devpost.com/software/recipe-bot");
        assert!(!second.has_tagline());
    }

    #[test]
    fn test_container_without_link_yields_nothing() {
        let html = r#"
          <div class="gallery-item"><h5>No Link Here</h5><p class="tagline">x</p></div>
          <div class="gallery-item">
            <h5>Elsewhere</h5><a href="/hackathons/x">not a project</a>
          </div>
        "#;
        let page = extractor().extract(html, &base());
        assert!(page.records.is_empty());
        assert!(page.strategy.is_none());
    }

    #[test]
    fn test_container_without_title_yields_nothing() {
        let html = r#"<div class="project-card"><a href="/software/x">x</a></div>"#;
        assert!(extractor().extract(html, &base()).records.is_empty());
    }

    #[test]
    fn test_falls_through_to_later_strategy() {
        let html = r#"
          <div class="software-result"><span>broken card</span></div>
          <div class="gallery-item">
            <a href="/software/later"><h5>Later</h5></a>
          </div>
        "#;
        let page = extractor().extract(html, &base());
        assert_eq!(page.strategy.as_deref(), Some("gallery-item"));
        assert_eq!(page.records[0].url, "https://devpost.com/software/later");
    }

    #[test]
    fn test_first_productive_strategy_wins() {
        let html = r#"
          <div class="software-result"><a href="/software/a"><h5>A</h5></a></div>
          <div class="gallery-item"><a href="/software/b"><h5>B</h5></a></div>
        "#;
        let page = extractor().extract(html, &base());
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].title, "A");
    }

    #[test]
    fn test_page_without_results() {
        let page = extractor().extract("<html><body><p>No results</p></body></html>", &base());
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let mut strategies = SiteProfile::default().strategies;
        strategies[0].container = "div[".to_string();
        let err = MarkupExtractor::new(&strategies).unwrap_err();
        assert!(matches!(err, ScoutError::InvalidSelector { .. }));
    }

    #[test]
    fn test_resolve_link() {
        let b = base();
        assert_eq!(
            resolve_link(&b, "/software/x").as_deref(),
            Some("https://devpost.com/software/x")
        );
        assert_eq!(
            resolve_link(&b, "https://other.io/software/y").as_deref(),
            Some("https://other.io/software/y")
        );
        assert_eq!(resolve_link(&b, "#top"), None);
        assert_eq!(resolve_link(&b, "  "), None);
    }

    #[test]
    fn test_selector_counts_and_sample_links() {
        let html = r#"
          <div class="software-list-item"><a href="/software/a">Alpha</a></div>
          <div class="software-list-item"><a href="/software/b">Beta</a></div>
          <div class="project-x"><a href="/software/c">Gamma</a></div>
        "#;
        let counts = selector_counts(html, &["[class*=\"software\"]".to_string()]).unwrap();
        assert_eq!(counts[0].1, 2);

        let links = sample_links(html, "a[href*=\"/software/\"]", &base(), 2).unwrap();
        assert_eq!(
            links,
            vec![
                ("https://devpost.com/software/a".to_string(), "Alpha".to_string()),
                ("https://devpost.com/software/b".to_string(), "Beta".to_string()),
            ]
        );

        let per_strategy = extractor().container_counts(html);
        assert_eq!(per_strategy.len(), 4);
        assert_eq!(per_strategy[3], ("software-list-item".to_string(), 2));
    }
}
