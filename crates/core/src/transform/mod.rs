//! Record transformer - reshapes listing records into export tables
//!
//! Columns follow the first-seen order of record keys across all rows, then
//! any derived columns. Renamed columns keep the position of the field they
//! rename. Absent fields export as empty strings; transformation never fails.

use serde_json::Value;
use studyreport_domain::constants::{
    AREA_ID_FIELDS, FINISHED_HIDDEN_FIELDS, LABEL_BRANCH, LABEL_NAME, LABEL_ORG_PATH,
    LABEL_RATE, LABEL_STUDIED, LABEL_STUDY_TIME, LABEL_TOTAL, ORG_PATH_FIELDS,
};
use studyreport_domain::{Column, ExportTable, OrgHierarchy, OrgSummary, Record};

const USERNAME_FIELD: &str = "username";
const ADD_TIME_FIELD: &str = "addTime";

/// Which unfinished-records layout to produce
#[derive(Debug, Clone, Copy)]
pub enum UnfinishedScope<'a> {
    /// Whole organization: each row gets its sub-org resolved from the map.
    Organization(&'a OrgHierarchy),
    /// A single sub-org: only the name stays visible.
    SubOrg,
}

/// Completed-study listing.
///
/// Adds the `组织` path column, renames the timestamp and user name, and
/// hides the internal fields (appending any that no record carried).
pub fn finished_table(records: &[Record]) -> ExportTable {
    let mut fields = record_fields(records);
    for hidden in FINISHED_HIDDEN_FIELDS {
        if !fields.iter().any(|f| f == hidden) {
            fields.push(hidden.to_string());
        }
    }

    let mut columns: Vec<Column> = fields
        .iter()
        .map(|field| Column {
            name: finished_label(field).to_string(),
            hidden: FINISHED_HIDDEN_FIELDS.contains(&field.as_str()),
        })
        .collect();
    columns.push(Column::visible(LABEL_ORG_PATH));

    let rows = records
        .iter()
        .map(|record| {
            let mut row = cells(record, &fields);
            row.push(Value::String(org_path(record)));
            row
        })
        .collect();

    ExportTable { columns, rows }
}

/// Not-yet-completed listing in one of the two [`UnfinishedScope`] layouts.
pub fn unfinished_table(records: &[Record], scope: UnfinishedScope<'_>) -> ExportTable {
    let fields = record_fields(records);

    let mut columns: Vec<Column> = fields
        .iter()
        .map(|field| {
            let name = if field == USERNAME_FIELD { LABEL_NAME } else { field.as_str() };
            Column { name: name.to_string(), hidden: name != LABEL_NAME }
        })
        .collect();

    let rows = match scope {
        UnfinishedScope::Organization(hierarchy) => {
            columns.push(Column::visible(LABEL_BRANCH));
            records
                .iter()
                .map(|record| {
                    let mut row = cells(record, &fields);
                    row.push(Value::String(resolve_area(record, hierarchy)));
                    row
                })
                .collect()
        }
        UnfinishedScope::SubOrg => records.iter().map(|record| cells(record, &fields)).collect(),
    };

    ExportTable { columns, rows }
}

/// Per-sub-org statistics sorted by sub-org name, with the id column hidden.
pub fn org_summary_table(summaries: &[OrgSummary]) -> ExportTable {
    let mut sorted: Vec<&OrgSummary> = summaries.iter().collect();
    sorted.sort_by(|a, b| a.org_name.cmp(&b.org_name));

    let columns = vec![
        Column::hidden("id"),
        Column::visible(LABEL_BRANCH),
        Column::visible(LABEL_STUDIED),
        Column::visible(LABEL_TOTAL),
        Column::visible(LABEL_RATE),
    ];
    let rows = sorted
        .into_iter()
        .map(|s| {
            vec![
                s.id.as_value().clone(),
                Value::String(s.org_name.clone()),
                Value::from(s.num),
                Value::from(s.all_num),
                Value::from(s.occupancy),
            ]
        })
        .collect();

    ExportTable { columns, rows }
}

/// Sub-org name of a record: the first of `areaid1..areaid5` the hierarchy
/// knows, or `""` when none resolves.
pub fn resolve_area(record: &Record, hierarchy: &OrgHierarchy) -> String {
    AREA_ID_FIELDS
        .iter()
        .filter_map(|field| record.get(field))
        .filter(|id| !id.is_null())
        .find_map(|id| hierarchy.name_for(&studyreport_domain::value_text(id)))
        .unwrap_or_default()
        .to_string()
}

/// `lev1-lev2-lev3-lev4` with missing levels left empty.
pub fn org_path(record: &Record) -> String {
    ORG_PATH_FIELDS.iter().map(|field| record.text(field)).collect::<Vec<_>>().join("-")
}

fn finished_label(field: &str) -> &str {
    match field {
        ADD_TIME_FIELD => LABEL_STUDY_TIME,
        USERNAME_FIELD => LABEL_NAME,
        other => other,
    }
}

fn record_fields(records: &[Record]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !fields.iter().any(|f| f == key) {
                fields.push(key.to_string());
            }
        }
    }
    fields
}

fn cells(record: &Record, fields: &[String]) -> Vec<Value> {
    fields
        .iter()
        .map(|field| match record.get(field) {
            Some(value) if !value.is_null() => value.clone(),
            _ => Value::String(String::new()),
        })
        .collect()
}
