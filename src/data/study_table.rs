//! Tabular study metadata with named categorical columns.

use crate::error::{DiversityError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Sentinel category recorded for wells whose annotation is absent.
///
/// Missing values are first-class categories: dropping them would understate
/// richness and skew every downstream statistic.
pub const NOT_LISTED: &str = "Not listed";

/// Per-study table of categorical annotation values.
///
/// Rows are well records, columns are image attributes (organism, cell line,
/// gene identifier, ...) plus administrative identifiers. The statistics
/// engine only ever reads columns; nothing here is mutated after load.
#[derive(Debug, Clone)]
pub struct StudyTable {
    /// Study identifier (file stem for tables loaded from disk).
    study_name: String,
    /// Column names in table order.
    column_names: Vec<String>,
    /// Column-major values; `columns[i].len() == n_rows` for every column.
    columns: Vec<Vec<String>>,
}

impl StudyTable {
    /// Create a table from row-major records.
    ///
    /// Rows shorter than the header are padded with the [`NOT_LISTED`]
    /// sentinel; rows longer than the header are an error.
    pub fn new(
        study_name: impl Into<String>,
        column_names: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self> {
        let n_columns = column_names.len();
        if n_columns == 0 {
            return Err(DiversityError::EmptyData(
                "Study table must have at least one column".to_string(),
            ));
        }
        let mut columns = vec![Vec::with_capacity(rows.len()); n_columns];
        for row in &rows {
            if row.len() > n_columns {
                return Err(DiversityError::InvalidParameter(format!(
                    "Row has {} values but table has {} columns",
                    row.len(),
                    n_columns
                )));
            }
            for (col_idx, column) in columns.iter_mut().enumerate() {
                let value = row.get(col_idx).map(|v| normalize_cell(v));
                column.push(value.unwrap_or_else(|| NOT_LISTED.to_string()));
            }
        }
        Ok(Self {
            study_name: study_name.into(),
            column_names,
            columns,
        })
    }

    /// Load a study table from a TSV file.
    ///
    /// Expected format:
    /// - First row: header with column names
    /// - Subsequent rows: one well record per line
    ///
    /// The study name is taken from the file stem (up to the first dot).
    /// Empty and "NA" cells are stored as the [`NOT_LISTED`] sentinel.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let study_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.split('.').next().unwrap_or(n).to_string())
            .unwrap_or_default();

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header_line = lines
            .next()
            .ok_or_else(|| DiversityError::EmptyData("Empty study table file".to_string()))??;
        let column_names: Vec<String> = header_line
            .split('\t')
            .map(|s| s.trim().to_string())
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for line_result in lines {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(line.split('\t').map(|s| s.to_string()).collect());
        }

        if rows.is_empty() {
            return Err(DiversityError::EmptyData(
                "No well records in study table file".to_string(),
            ));
        }

        Self::new(study_name, column_names, rows)
    }

    /// Study identifier.
    pub fn study_name(&self) -> &str {
        &self.study_name
    }

    /// Column names in table order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of rows (well records).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Get all values of a column.
    pub fn column(&self, column: &str) -> Result<&[String]> {
        let idx = self
            .column_names
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DiversityError::MissingColumn(column.to_string()))?;
        Ok(&self.columns[idx])
    }
}

/// Map empty and NA-style cells to the sentinel, keep everything else verbatim.
fn normalize_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "NA" || trimmed == "na" {
        NOT_LISTED.to_string()
    } else {
        trimmed.to_string()
    }
}
