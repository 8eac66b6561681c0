//! Report service - the five export actions offered for a study period

use std::path::PathBuf;
use std::sync::Arc;

use studyreport_domain::constants::{TITLE_FINISHED, TITLE_ORG_SUMMARY, TITLE_UNFINISHED};
use studyreport_domain::{
    ClassInfo, ExportFileName, ExportTable, OrgSummary, RecordListing, Result, Session,
};
use tracing::info;

use super::ports::ExportSink;
use crate::aggregation::PageAggregator;
use crate::transform::{self, UnfinishedScope};

/// Where an export landed and how many rows it holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub rows: usize,
}

pub struct ReportService {
    aggregator: PageAggregator,
    sink: Arc<dyn ExportSink>,
}

impl ReportService {
    pub fn new(aggregator: PageAggregator, sink: Arc<dyn ExportSink>) -> Self {
        Self { aggregator, sink }
    }

    /// Completed-study list for the whole organization, or for one sub-org.
    pub async fn export_finished(
        &self,
        session: &Session,
        class: &ClassInfo,
        sub_org: Option<&OrgSummary>,
    ) -> Result<ExportOutcome> {
        let records = self
            .aggregator
            .fetch_all(RecordListing::Finished, session, &class.id, sub_org.map(|s| &s.id))
            .await?;
        let table = transform::finished_table(&records);
        self.write(scoped_title(TITLE_FINISHED, sub_org), class, table).await
    }

    /// Not-yet-completed list. The organization-wide layout resolves each
    /// row's sub-org, which needs a fresh hierarchy.
    pub async fn export_unfinished(
        &self,
        session: &Session,
        class: &ClassInfo,
        sub_org: Option<&OrgSummary>,
    ) -> Result<ExportOutcome> {
        let table = match sub_org {
            None => {
                let hierarchy = self.aggregator.org_hierarchy(session, &class.id).await?;
                let records = self
                    .aggregator
                    .fetch_all(RecordListing::Unfinished, session, &class.id, None)
                    .await?;
                transform::unfinished_table(&records, UnfinishedScope::Organization(&hierarchy))
            }
            Some(org) => {
                let records = self
                    .aggregator
                    .fetch_all(RecordListing::Unfinished, session, &class.id, Some(&org.id))
                    .await?;
                transform::unfinished_table(&records, UnfinishedScope::SubOrg)
            }
        };
        self.write(scoped_title(TITLE_UNFINISHED, sub_org), class, table).await
    }

    /// Completion statistics of every sub-org.
    pub async fn export_org_summary(
        &self,
        session: &Session,
        class: &ClassInfo,
    ) -> Result<ExportOutcome> {
        let summaries = self.aggregator.org_summaries(session, &class.id).await?;
        let table = transform::org_summary_table(&summaries);
        self.write(TITLE_ORG_SUMMARY.to_string(), class, table).await
    }

    async fn write(
        &self,
        title: String,
        class: &ClassInfo,
        table: ExportTable,
    ) -> Result<ExportOutcome> {
        let name = ExportFileName::new(title, class.title.clone());
        let path = self.sink.write(&name, &table).await?;
        info!(path = %path.display(), rows = table.rows.len(), "Export written");
        Ok(ExportOutcome { path, rows: table.rows.len() })
    }
}

fn scoped_title(title: &str, sub_org: Option<&OrgSummary>) -> String {
    match sub_org {
        Some(org) => format!("{}{}", org.org_name, title),
        None => title.to_string(),
    }
}
