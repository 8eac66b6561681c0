//! Port interface for export destinations

use std::path::PathBuf;

use async_trait::async_trait;
use studyreport_domain::{ExportFileName, ExportTable, Result};

/// Writes a finished table somewhere durable
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Returns the location the table was written to.
    async fn write(&self, name: &ExportFileName, table: &ExportTable) -> Result<PathBuf>;
}
