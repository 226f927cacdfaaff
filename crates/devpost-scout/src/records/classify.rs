// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Keyword classification of project records.
//!
//! A record matches when any phrase of the keyword set occurs, ignoring
//! case, as a substring of its title or tagline. Classification only
//! decides inclusion; records are never modified.

use super::types::ProjectRecord;

/// Phrases that mark a project as AI-agent related.
pub const AGENT_KEYWORDS: &[&str] = &[
    "agent",
    "agents",
    "autonomous",
    "assistant",
    "chatbot",
    "bot",
    "conversational",
    "dialogue",
    "nlp",
    "natural language",
    "llm",
    "large language model",
    "gpt",
    "claude",
    "gemini",
    "ai assistant",
    "virtual assistant",
    "intelligent agent",
    "ai agent",
    "multi-agent",
];

/// Lighter subset used by the comprehensive scrape pass.
pub const AGENT_CORE_KEYWORDS: &[&str] =
    &["agent", "agents", "autonomous", "assistant", "chatbot", "bot"];

/// Ordered set of lower-cased match phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    phrases: Vec<String>,
}

impl KeywordSet {
    /// Build a set from arbitrary phrases. Phrases are lower-cased and
    /// trimmed; blanks and repeats are dropped, first position wins.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for phrase in phrases {
            let p = phrase.as_ref().trim().to_lowercase();
            if !p.is_empty() && !out.contains(&p) {
                out.push(p);
            }
        }
        Self { phrases: out }
    }

    /// The full AI-agent keyword set.
    pub fn agent_default() -> Self {
        Self::new(AGENT_KEYWORDS)
    }

    /// The narrow AI-agent keyword set.
    pub fn agent_core() -> Self {
        Self::new(AGENT_CORE_KEYWORDS)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrases of this set found in the record's title or tagline.
    pub fn matching<'a>(&'a self, record: &ProjectRecord) -> Vec<&'a str> {
        let title = record.title.to_lowercase();
        let tagline = record.tagline.to_lowercase();
        self.phrases
            .iter()
            .filter(|k| title.contains(k.as_str()) || tagline.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// True when any keyword occurs in the record's title or tagline.
pub fn is_match(record: &ProjectRecord, keywords: &KeywordSet) -> bool {
    let title = record.title.to_lowercase();
    let tagline = record.tagline.to_lowercase();
    keywords
        .phrases
        .iter()
        .any(|k| title.contains(k.as_str()) || tagline.contains(k.as_str()))
}

/// Clone out the records that match, preserving order.
pub fn filter_matching(records: &[ProjectRecord], keywords: &KeywordSet) -> Vec<ProjectRecord> {
    records
        .iter()
        .filter(|r| is_match(r, keywords))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: &str, tagline: &str) -> ProjectRecord {
        ProjectRecord::from_markup(
            title.to_string(),
            format!("https://devpost.com/software/{}", title.to_lowercase().replace(' ', "-")),
            Some(tagline.to_string()),
        )
    }

    #[test]
    fn test_match_is_case_insensitive_on_title() {
        let kw = KeywordSet::new(["agent"]);
        assert!(is_match(&rec("AI Agent Demo", "x"), &kw));
    }

    #[test]
    fn test_match_on_tagline() {
        let kw = KeywordSet::new(["bot"]);
        assert!(is_match(&rec("Cooking App", "A simple recipe bot"), &kw));
    }

    #[test]
    fn test_no_match_against_default_set() {
        let kw = KeywordSet::agent_default();
        assert!(!is_match(&rec("Weather App", "shows forecasts"), &kw));
    }

    #[test]
    fn test_uppercase_keywords_are_normalized() {
        let kw = KeywordSet::new(["  LLM ", "llm", ""]);
        assert_eq!(kw.phrases(), &["llm".to_string()]);
        assert!(is_match(&rec("Tiny", "runs a local llm"), &kw));
    }

    #[test]
    fn test_default_sets() {
        assert_eq!(KeywordSet::agent_default().len(), 20);
        assert_eq!(KeywordSet::agent_core().len(), 6);
        assert!(KeywordSet::new(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_matching_lists_hits_in_set_order() {
        let kw = KeywordSet::agent_default();
        let hits = kw.matching(&rec("Multi-Agent Planner", "autonomous helpers"));
        assert_eq!(hits, vec!["agent", "autonomous", "multi-agent"]);
    }

    #[test]
    fn test_filter_preserves_order_and_leaves_records_untouched() {
        let records = vec![
            rec("Chatbot One", "talks"),
            rec("Spreadsheet", "numbers"),
            rec("Helper", "a virtual assistant"),
        ];
        let before = records.clone();
        let kept = filter_matching(&records, &KeywordSet::agent_core());
        let titles: Vec<&str> = kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Chatbot One", "Helper"]);
        assert_eq!(records, before);
    }
}
