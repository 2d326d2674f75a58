//! Review Filter Module
//! Resolves a query against the category mapping, filters comments and
//! gathers the dashboard statistics. Evaluation never fails on user input.

use crate::data::mapping::{self, Language};
use crate::data::ReviewTable;
use crate::stats::{CategoryCounts, StatsCalculator, TOTAL_COMMENTS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Message shown when comments were requested but nothing matched.
pub const NO_MATCHES_MESSAGE: &str = "No comments match the selected filters.";

/// Fixed narrative shown under "Identified Patterns".
pub const IDENTIFIED_PATTERNS: &str = "\
Patterns Identified Successfully

Common patterns and keywords prominently listed in user comments:

1. Errors:
    • Encountered during application operation
    • Issues viewing job postings
    • Application crashes
    • Malfunctioning filters
    • Problems sending emails

2. Lack of Response:
    • No feedback received for job applications

3. Filtering Issues:
    • Improper functioning in job searches and postings

4. Location Inaccuracies:
    • Errors in location-based ranking
    • Irrelevant job postings from undesired cities";

/// Dashboard query. Category and language stay raw strings so unknown
/// values degrade to an empty result instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub category: String,
    pub language: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

impl FilterQuery {
    pub fn new(category: impl Into<String>, language: Language, keyword: Option<String>) -> Self {
        Self {
            category: category.into(),
            language: language.code().to_string(),
            keyword,
        }
    }

    /// Keyword to filter by, ignoring an empty entry.
    pub fn active_keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }
}

/// Whether the user has asked to see comments in this session.
///
/// Once requested it stays requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    requested: bool,
}

impl RevealState {
    pub fn requested() -> Self {
        Self { requested: true }
    }

    /// Record a "Show Comments" action.
    pub fn request(&mut self) {
        self.requested = true;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

/// What the comments section should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CommentDisplay {
    NotRequested,
    RequestedEmpty { message: &'static str },
    RequestedPopulated { items: Vec<String> },
}

impl CommentDisplay {
    fn from_matches(reveal: RevealState, matches: Vec<String>) -> Self {
        if !reveal.is_requested() {
            CommentDisplay::NotRequested
        } else if matches.is_empty() {
            CommentDisplay::RequestedEmpty {
                message: NO_MATCHES_MESSAGE,
            }
        } else {
            CommentDisplay::RequestedPopulated { items: matches }
        }
    }

    /// Comments to list; empty unless populated.
    #[cfg(test)]
    pub fn items(&self) -> &[String] {
        match self {
            CommentDisplay::RequestedPopulated { items } => items,
            _ => &[],
        }
    }
}

/// Everything the dashboard renders for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    pub comments: CommentDisplay,
    /// Number of comments matching the query, independent of the reveal state.
    pub matched: usize,
    pub total_comments: &'static str,
    pub counts_by_category: CategoryCounts,
    pub highest_category: &'static str,
    pub lowest_category: &'static str,
    pub patterns_text: &'static str,
}

/// Stateless filter and aggregation over a [`ReviewTable`].
pub struct FilterEngine;

impl FilterEngine {
    /// Evaluate a query against the table.
    pub fn evaluate(table: &ReviewTable, query: &FilterQuery, reveal: RevealState) -> FilterResult {
        let matches = Self::matching_comments(table, query);
        let matched = matches.len();

        let counts = match query.language.parse::<Language>() {
            Ok(language) => StatsCalculator::category_counts(table, language),
            Err(_) => CategoryCounts::zeroed(),
        };

        debug!(
            category = %query.category,
            language = %query.language,
            keyword = query.active_keyword().unwrap_or(""),
            matched,
            revealed = reveal.is_requested(),
            "evaluated review filter"
        );

        FilterResult {
            comments: CommentDisplay::from_matches(reveal, matches),
            matched,
            total_comments: TOTAL_COMMENTS,
            highest_category: counts.highest(),
            lowest_category: counts.lowest(),
            counts_by_category: counts,
            patterns_text: IDENTIFIED_PATTERNS,
        }
    }

    /// Non-empty comments of the resolved column containing the keyword, in row order.
    pub fn matching_comments(table: &ReviewTable, query: &FilterQuery) -> Vec<String> {
        let Some(column) = mapping::resolve_column(&query.category, &query.language) else {
            return Vec::new();
        };
        let Some(values) = table.non_empty_values(column) else {
            return Vec::new();
        };

        match query.active_keyword() {
            Some(keyword) => {
                let needle = keyword.to_lowercase();
                values
                    .into_iter()
                    .filter(|comment| comment.to_lowercase().contains(&needle))
                    .collect()
            }
            None => values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ReviewTable {
        ReviewTable::from_columns(vec![
            ("Id", vec![Some("1"), Some("2"), Some("3"), Some("4")]),
            (
                "Kullanıcı Arayüzü Sorunları (TR)",
                vec![None, None, None, None],
            ),
            (
                "User Interface Issues (EN)",
                vec![Some("Buttons overlap"), None, Some("Dark mode broken"), None],
            ),
            (
                "Notification Issues (EN)",
                vec![
                    Some("No EMAIL after applying"),
                    Some("Push alerts arrive late"),
                    None,
                    Some("Email digest is empty"),
                ],
            ),
            (
                "Bildirim Sorunları (TR)",
                vec![Some("E-posta gelmiyor"), None, None, None],
            ),
            (
                "Performans Sorunları (TR)",
                vec![Some("Error occurred"), Some("Yavaş"), Some("Donuyor"), None],
            ),
        ])
        .unwrap()
    }

    fn query(category: &str, language: &str, keyword: &str) -> FilterQuery {
        FilterQuery {
            category: category.to_string(),
            language: language.to_string(),
            keyword: Some(keyword.to_string()),
        }
    }

    #[test]
    fn hidden_until_requested_but_stats_populated() {
        let table = sample_table();
        let q = query("User Interface Issues", "TR", "");
        let result = FilterEngine::evaluate(&table, &q, RevealState::default());

        assert_eq!(result.comments, CommentDisplay::NotRequested);
        assert_eq!(result.counts_by_category.iter().count(), 8);
        assert_eq!(result.highest_category, "Performance Problems");
        assert_eq!(result.lowest_category, "User Interface Issues");
        assert_eq!(result.total_comments, "63");
        assert_eq!(result.patterns_text, IDENTIFIED_PATTERNS);
    }

    #[test]
    fn requested_with_empty_column_shows_message() {
        let table = sample_table();
        let q = query("User Interface Issues", "TR", "");
        let result = FilterEngine::evaluate(&table, &q, RevealState::requested());

        assert_eq!(
            result.comments,
            CommentDisplay::RequestedEmpty {
                message: "No comments match the selected filters."
            }
        );
        assert!(result.comments.items().is_empty());
    }

    #[test]
    fn keyword_is_case_insensitive_substring() {
        let table = sample_table();
        let q = query("Notification Issues", "EN", "email");
        let result = FilterEngine::evaluate(&table, &q, RevealState::requested());

        assert_eq!(
            result.comments.items(),
            ["No EMAIL after applying", "Email digest is empty"]
        );
        assert_eq!(result.matched, 2);

        let q = query("Performance Problems", "TR", "error");
        assert_eq!(
            FilterEngine::matching_comments(&table, &q),
            vec!["Error occurred"]
        );
    }

    #[test]
    fn keyword_is_literal_text() {
        let table = sample_table();
        let q = query("Notification Issues", "EN", "e.*l");
        assert!(FilterEngine::matching_comments(&table, &q).is_empty());
    }

    #[test]
    fn missing_keyword_keeps_all_rows_in_order() {
        let table = sample_table();
        let mut q = query("User Interface Issues", "EN", "");
        q.keyword = None;
        assert_eq!(
            FilterEngine::matching_comments(&table, &q),
            vec!["Buttons overlap", "Dark mode broken"]
        );
    }

    #[test]
    fn unknown_pairs_degrade_to_empty() {
        let table = sample_table();
        for q in [
            query("Billing", "EN", ""),
            query("Notification Issues", "DE", ""),
            query("Customer Support", "EN", ""),
        ] {
            let result = FilterEngine::evaluate(&table, &q, RevealState::requested());
            assert!(matches!(result.comments, CommentDisplay::RequestedEmpty { .. }));
            assert_eq!(result.counts_by_category.iter().count(), 8);
        }
    }

    #[test]
    fn unknown_language_zeroes_counts() {
        let table = sample_table();
        let result = FilterEngine::evaluate(
            &table,
            &query("Notification Issues", "FR", ""),
            RevealState::default(),
        );
        assert_eq!(result.counts_by_category.max_count(), 0);
        assert_eq!(result.highest_category, "User Interface Issues");
    }

    #[test]
    fn counts_ignore_keyword_and_category() {
        let table = sample_table();
        let broad = FilterEngine::evaluate(
            &table,
            &query("Notification Issues", "EN", ""),
            RevealState::default(),
        );
        let narrow = FilterEngine::evaluate(
            &table,
            &query("User Interface Issues", "EN", "zzz"),
            RevealState::default(),
        );
        assert_eq!(broad.counts_by_category, narrow.counts_by_category);
        assert_eq!(broad.counts_by_category.get("Notification Issues"), Some(3));
        assert_eq!(broad.highest_category, "Notification Issues");
    }

    #[test]
    fn reveal_state_is_monotonic() {
        let mut reveal = RevealState::default();
        assert!(!reveal.is_requested());
        reveal.request();
        reveal.request();
        assert!(reveal.is_requested());
    }
}
