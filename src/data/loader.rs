//! Review Spreadsheet Loader Module
//! Reads the review workbook (or a CSV export of it) into a text-only Polars table.

use crate::data::mapping;
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Review file not found: {0}")]
    NotFound(PathBuf),
    #[error("Unsupported file format: {0} (expected xlsx, xlsm, xls, ods or csv)")]
    UnsupportedFormat(String),
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Workbook has no worksheet or header row")]
    EmptySheet,
    #[error("Failed to build review table: {0}")]
    Table(#[from] PolarsError),
}

/// Cell values treated as missing in data rows (pandas' default NA strings).
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Read-only table of review records. Every column holds text.
#[derive(Debug, Clone)]
pub struct ReviewTable {
    df: DataFrame,
    source: Option<PathBuf>,
}

impl ReviewTable {
    /// Wrap a DataFrame, casting every non-text column to text.
    pub fn new(df: DataFrame) -> Result<Self, LoadError> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| {
                if col.dtype() == &DataType::String {
                    Ok(col.clone())
                } else {
                    col.cast(&DataType::String)
                }
            })
            .collect::<PolarsResult<Vec<Column>>>()?;
        Ok(Self {
            df: DataFrame::new(columns)?,
            source: None,
        })
    }

    /// Build a table from named text columns. Empty strings count as missing.
    #[cfg(test)]
    pub fn from_columns<N, V>(columns: Vec<(N, Vec<Option<V>>)>) -> Result<Self, LoadError>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(|(name, values)| {
                let name: String = name.into();
                let values: Vec<Option<String>> = values
                    .into_iter()
                    .map(|v| v.map(Into::into).filter(|s: &String| !s.is_empty()))
                    .collect();
                Column::new(name.into(), values)
            })
            .collect();

        Self::new(DataFrame::new(columns)?)
    }

    fn with_source(mut self, source: &Path) -> Self {
        self.source = Some(source.to_path_buf());
        self
    }

    /// Path the table was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.df.column(column).is_ok()
    }

    /// Non-empty values of a column in row order. `None` if the column is absent.
    pub fn non_empty_values(&self, column: &str) -> Option<Vec<String>> {
        let ca = self.df.column(column).ok()?.str().ok()?;
        Some(
            ca.into_iter()
                .flatten()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Number of non-empty values in a column; an absent column counts zero.
    pub fn non_empty_count(&self, column: &str) -> usize {
        self.df
            .column(column)
            .ok()
            .and_then(|col| col.str().ok())
            .map(|ca| ca.into_iter().flatten().filter(|v| !v.is_empty()).count())
            .unwrap_or(0)
    }
}

/// Supported input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    fn detect(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            "csv" => Ok(SourceFormat::Csv),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Loads the review spreadsheet once at startup.
pub struct ReviewLoader;

impl ReviewLoader {
    /// Load a review file into a [`ReviewTable`].
    pub fn load(path: impl AsRef<Path>) -> Result<ReviewTable, LoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let format = SourceFormat::detect(path)?;
        info!(path = %path.display(), ?format, "loading review data");

        let df = match format {
            SourceFormat::Workbook => Self::read_workbook(path)?,
            SourceFormat::Csv => Self::read_csv(path)?,
        };
        let table = ReviewTable::new(df)?.with_source(path);

        info!(
            rows = table.row_count(),
            columns = table.df.width(),
            "review data loaded"
        );
        Self::warn_missing_columns(&table);

        Ok(table)
    }

    /// First worksheet, first row as header.
    fn read_workbook(path: &Path) -> Result<DataFrame, LoadError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptySheet)??;

        let mut rows = range.rows();
        let header: Vec<Option<String>> = rows
            .next()
            .ok_or(LoadError::EmptySheet)?
            .iter()
            .map(Self::cell_text)
            .collect();

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];
        for row in rows {
            for (idx, column) in values.iter_mut().enumerate() {
                column.push(row.get(idx).and_then(Self::cell_text));
            }
        }

        Self::build_frame(header, values)
    }

    /// Headerless read with every column as text; the first row is the header.
    fn read_csv(path: &Path) -> Result<DataFrame, LoadError> {
        let path_str = path.to_string_lossy().to_string();
        let raw = LazyCsvReader::new(path_str.as_str())
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        if raw.height() == 0 {
            return Err(LoadError::EmptySheet);
        }

        let mut header = Vec::with_capacity(raw.width());
        let mut values: Vec<Vec<Option<String>>> = Vec::with_capacity(raw.width());
        for col in raw.get_columns() {
            let mut cells = col
                .str()?
                .into_iter()
                .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string));
            header.push(cells.next().flatten());
            values.push(cells.collect());
        }

        Self::build_frame(header, values)
    }

    /// Name the columns and drop missing-value markers from the data cells.
    fn build_frame(
        header: Vec<Option<String>>,
        values: Vec<Vec<Option<String>>>,
    ) -> Result<DataFrame, LoadError> {
        let columns = Self::header_names(header.into_iter())
            .into_iter()
            .zip(values)
            .map(|(name, vals)| {
                let vals: Vec<Option<String>> = vals
                    .into_iter()
                    .map(|v| v.filter(|s| !Self::is_missing_marker(s)))
                    .collect();
                Column::new(name.into(), vals)
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Text of a cell, or `None` for empty cells, empty strings and error cells.
    fn cell_text(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::String(s) if s.is_empty() => None,
            Data::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Exact-match strings that mark a missing value, as pandas reads them.
    fn is_missing_marker(text: &str) -> bool {
        MISSING_MARKERS.contains(&text)
    }

    /// Blank headers become `Unnamed: {idx}`; repeated headers get a `.{n}` suffix.
    /// Header text is kept verbatim.
    fn header_names(raw: impl Iterator<Item = Option<String>>) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        raw.enumerate()
            .map(|(idx, name)| {
                let base = name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| format!("Unnamed: {}", idx));
                let count = seen.entry(base.clone()).or_insert(0);
                let unique = if *count == 0 {
                    base.clone()
                } else {
                    format!("{}.{}", base, count)
                };
                *count += 1;
                unique
            })
            .collect()
    }

    fn warn_missing_columns(table: &ReviewTable) {
        let mapped = table
            .column_names()
            .iter()
            .filter(|name| mapping::category_for_column(name).is_some())
            .count();
        info!(mapped_columns = mapped, "category columns found");

        for (column, category) in mapping::flattened() {
            if !table.has_column(column) {
                warn!(category, column, "category column missing from review data");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::fs;

    fn write_xlsx(path: &Path, rows: &[&[&str]]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn loads_first_sheet_of_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.xlsx");
        write_xlsx(
            &path,
            &[
                &["Id", "Notification Issues (EN)", "Bildirim Sorunları (TR)"],
                &["1", "No email arrives", "E-posta gelmiyor"],
                &["2", "", "Bildirim yok"],
                &["3", "Email sent twice", ""],
            ],
        );

        let table = ReviewLoader::load(&path).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.source(), Some(path.as_path()));
        assert_eq!(
            table.non_empty_values("Notification Issues (EN)").unwrap(),
            vec!["No email arrives", "Email sent twice"]
        );
        assert_eq!(table.non_empty_count("Bildirim Sorunları (TR)"), 2);
    }

    #[test]
    fn loads_csv_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(
            &path,
            "Rating,Customer Support (EN)\n1,Nobody answers\n2,\n3,Slow replies\n",
        )
        .unwrap();

        let table = ReviewLoader::load(&path).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.non_empty_count("Customer Support (EN)"), 2);
        assert_eq!(
            table.non_empty_values("Rating").unwrap(),
            vec!["1", "2", "3"]
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReviewLoader::load(dir.path().join("absent.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.txt");
        fs::write(&path, "hello").unwrap();
        let err = ReviewLoader::load(&path).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn csv_headers_are_normalized_like_workbook_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, "Comment,,Comment\nx,y,z\n").unwrap();

        let table = ReviewLoader::load(&path).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["Comment", "Unnamed: 1", "Comment.1"]
        );
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.non_empty_values("Unnamed: 1").unwrap(), vec!["y"]);
    }

    #[test]
    fn missing_value_markers_are_not_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(
            &path,
            "NA,Performance Problems (EN)\n1,N/A\n2,NA\n3,App freezes\n4,null\n",
        )
        .unwrap();

        let table = ReviewLoader::load(&path).unwrap();
        assert_eq!(table.row_count(), 4);
        assert_eq!(
            table.non_empty_values("Performance Problems (EN)").unwrap(),
            vec!["App freezes"]
        );
        // Header text is never a missing marker.
        assert!(table.has_column("NA"));
    }

    #[test]
    fn workbook_error_and_marker_cells_are_missing() {
        assert_eq!(
            ReviewLoader::cell_text(&Data::Error(calamine::CellErrorType::NA)),
            None
        );
        assert_eq!(
            ReviewLoader::cell_text(&Data::String("Slow".to_string())),
            Some("Slow".to_string())
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.xlsx");
        write_xlsx(
            &path,
            &[
                &["Account Management (EN)"],
                &["#N/A"],
                &["Cannot delete account"],
                &["NULL"],
            ],
        );
        let table = ReviewLoader::load(&path).unwrap();
        assert_eq!(table.non_empty_count("Account Management (EN)"), 1);
    }

    #[test]
    fn empty_workbook_is_empty_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        let err = ReviewLoader::load(&path).unwrap_err();
        assert!(matches!(err, LoadError::EmptySheet));
    }

    #[test]
    fn corrupt_workbook_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, b"not a zip archive").unwrap();
        assert!(ReviewLoader::load(&path).is_err());
    }

    #[test]
    fn header_names_are_unique() {
        let names = ReviewLoader::header_names(
            vec![
                Some("Comment".to_string()),
                None,
                Some("Comment".to_string()),
                Some("".to_string()),
                Some("Comment".to_string()),
                Some("Bildirim Sorunları (TR) ".to_string()),
            ]
            .into_iter(),
        );
        assert_eq!(
            names,
            vec![
                "Comment",
                "Unnamed: 1",
                "Comment.1",
                "Unnamed: 3",
                "Comment.2",
                "Bildirim Sorunları (TR) "
            ]
        );
    }

    #[test]
    fn absent_column_has_no_values() {
        let table = ReviewTable::from_columns(vec![("A", vec![Some("x"), None])]).unwrap();
        assert!(table.non_empty_values("B").is_none());
        assert_eq!(table.non_empty_count("B"), 0);
        assert_eq!(table.non_empty_count("A"), 1);
    }
}
