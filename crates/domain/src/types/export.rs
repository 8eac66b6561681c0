//! Normalized tables handed to the export sink

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One output column; hidden columns are exported but not meant for reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub hidden: bool,
}

impl Column {
    pub fn visible(name: impl Into<String>) -> Self {
        Self { name: name.into(), hidden: false }
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        Self { name: name.into(), hidden: true }
    }
}

/// Rows aligned to `columns`; every row has exactly one cell per column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl ExportTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn hidden_columns(&self) -> Vec<&str> {
        self.columns.iter().filter(|c| c.hidden).map(|c| c.name.as_str()).collect()
    }

    /// Cell of `row` under column `name`.
    pub fn cell(&self, row: usize, name: &str) -> Option<&Value> {
        let index = self.column_index(name)?;
        self.rows.get(row)?.get(index)
    }
}

/// `{title}-{period}-{timestamp}` naming of an export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFileName {
    pub title: String,
    pub period_title: String,
    pub timestamp: DateTime<Local>,
}

impl ExportFileName {
    pub fn new(title: impl Into<String>, period_title: impl Into<String>) -> Self {
        Self { title: title.into(), period_title: period_title.into(), timestamp: Local::now() }
    }

    /// File stem without extension; path separators are replaced.
    pub fn stem(&self) -> String {
        let raw = format!(
            "{}-{}-{}",
            self.title,
            self.period_title,
            self.timestamp.format("%Y%m%d%H%M%S")
        );
        raw.chars().map(|c| if matches!(c, '/' | '\\') { '_' } else { c }).collect()
    }
}
