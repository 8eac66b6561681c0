//! Export sink writing tables as JSON documents

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use studyreport_core::ExportSink;
use studyreport_domain::{Column, ExportFileName, ExportTable, Result};
use tracing::{info, instrument};

use crate::errors::InfraError;

/// On-disk layout of one export
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    title: &'a str,
    period: &'a str,
    exported_at: String,
    columns: &'a [Column],
    rows: &'a [Vec<Value>],
}

/// Writes each table to `{dir}/{stem}.json`, creating `dir` on demand
#[derive(Debug, Clone)]
pub struct JsonExportSink {
    dir: PathBuf,
}

impl JsonExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ExportSink for JsonExportSink {
    #[instrument(skip_all, fields(dir = %self.dir.display()))]
    async fn write(&self, name: &ExportFileName, table: &ExportTable) -> Result<PathBuf> {
        let document = ExportDocument {
            title: &name.title,
            period: &name.period_title,
            exported_at: name.timestamp.to_rfc3339(),
            columns: &table.columns,
            rows: &table.rows,
        };
        let json = serde_json::to_vec_pretty(&document).map_err(InfraError::from)?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(InfraError::from)?;
        let path = self.dir.join(format!("{}.json", name.stem()));
        tokio::fs::write(&path, json).await.map_err(InfraError::from)?;

        info!(path = %path.display(), rows = table.rows.len(), "Export written");
        Ok(path)
    }
}
