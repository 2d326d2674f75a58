//! Dashboard Report Module
//! Serializable snapshot of one evaluation, used by headless mode and JSON export.

use crate::data::{CommentDisplay, FilterQuery, FilterResult};
use crate::stats::CategoryCount;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Chart rendering failed: {0}")]
    Render(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// The result of one query as handed to a presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport<'a> {
    pub query: &'a FilterQuery,
    pub total_comments: &'static str,
    pub highest_category: &'static str,
    pub lowest_category: &'static str,
    pub matched: usize,
    pub chart: Vec<CategoryCount>,
    pub patterns: &'static str,
    pub comments: &'a CommentDisplay,
}

impl<'a> DashboardReport<'a> {
    pub fn new(query: &'a FilterQuery, result: &'a FilterResult) -> Self {
        Self {
            query,
            total_comments: result.total_comments,
            highest_category: result.highest_category,
            lowest_category: result.lowest_category,
            matched: result.matched,
            chart: result.counts_by_category.iter().cloned().collect(),
            patterns: result.patterns_text,
            comments: &result.comments,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
