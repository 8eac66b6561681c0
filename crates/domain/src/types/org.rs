//! Organization, class and progress summaries

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::record::EntityId;
use crate::constants::CURRENT_CLASS_SUFFIX;
use crate::utils::serde::{lenient_f64, lenient_i64, lenient_string};

/// Per-sub-org completion summary for one class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrgSummary {
    pub id: EntityId,
    #[serde(deserialize_with = "lenient_string")]
    pub org_name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub all_num: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub num: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub occupancy: f64,
}

impl OrgSummary {
    /// Picker label, e.g. `一班（30/40 75%）`.
    pub fn label(&self) -> String {
        format!("{}（{}/{} {}%）", self.org_name, self.num, self.all_num, self.occupancy)
    }
}

/// Lookup tables built from one org-class-record response
///
/// Summaries keep server order; a repeated name replaces the earlier entry in
/// place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrgHierarchy {
    names_by_id: HashMap<String, String>,
    index_by_name: HashMap<String, usize>,
    summaries: Vec<OrgSummary>,
}

impl OrgHierarchy {
    pub fn from_summaries(items: impl IntoIterator<Item = OrgSummary>) -> Self {
        let mut hierarchy = Self::default();
        for summary in items {
            hierarchy.names_by_id.insert(summary.id.key(), summary.org_name.clone());
            let existing = hierarchy.index_by_name.get(&summary.org_name).copied();
            match existing {
                Some(index) => hierarchy.summaries[index] = summary,
                None => {
                    let index = hierarchy.summaries.len();
                    hierarchy.index_by_name.insert(summary.org_name.clone(), index);
                    hierarchy.summaries.push(summary);
                }
            }
        }
        hierarchy
    }

    /// Org name for an id in its text form.
    pub fn name_for(&self, id: &str) -> Option<&str> {
        self.names_by_id.get(id).map(String::as_str)
    }

    pub fn summary(&self, name: &str) -> Option<&OrgSummary> {
        self.index_by_name.get(name).map(|&index| &self.summaries[index])
    }

    pub fn summaries(&self) -> &[OrgSummary] {
        &self.summaries
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// One study period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: EntityId,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub theme: String,
    #[serde(deserialize_with = "lenient_string")]
    pub start_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub end_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
}

impl ClassInfo {
    /// Catalog key: title and theme with embedded newlines removed.
    pub fn key(&self) -> String {
        format!("{}{}", self.title, self.theme).replace('\n', "")
    }
}

/// Class list keyed by [`ClassInfo::key`], newest first as served
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassCatalog {
    entries: Vec<(String, ClassInfo)>,
}

impl ClassCatalog {
    pub fn from_classes(classes: impl IntoIterator<Item = ClassInfo>) -> Self {
        let mut entries: Vec<(String, ClassInfo)> = Vec::new();
        for class in classes {
            let key = class.key();
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = class,
                None => entries.push((key, class)),
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassInfo> {
        self.entries.get(index).map(|(_, class)| class)
    }

    pub fn by_key(&self, key: &str) -> Option<&ClassInfo> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, class)| class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.entries.iter().map(|(_, class)| class)
    }

    /// Menu labels; the first entry is marked as the current period.
    pub fn choice_labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (key, _))| {
                if i == 0 {
                    format!("{key}{CURRENT_CLASS_SUFFIX}")
                } else {
                    key.clone()
                }
            })
            .collect()
    }
}

/// Member counts of the signed-in organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrgNumbers {
    #[serde(deserialize_with = "lenient_i64")]
    pub members: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub cadre: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub org_num: i64,
}

/// Identity of the signed-in organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrgDetail {
    #[serde(deserialize_with = "lenient_string")]
    pub parent_id_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub org_name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub num: i64,
}

/// Completion totals of the signed-in organization for one class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassProgress {
    pub id: EntityId,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub org_name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub all_num: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub num: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub occupancy: f64,
}
