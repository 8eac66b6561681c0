//! Application constants
//!
//! Endpoint paths, file names and export labels shared by every layer.

// Remote service
pub const DEFAULT_BASE_URL: &str = "https://hm.jxqingtuan.cn/api-org";
pub const SUCCESS_CODE: i64 = 200;
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const LOGIN_PATH: &str = "/user/login";
pub const UNFINISHED_RECORDS_PATH: &str = "/record/getUserNotFinishRecording";
pub const FINISHED_RECORDS_PATH: &str = "/record/getUserClassRecord";
pub const ORG_NUMBERS_PATH: &str = "/org/getMyOrgNum";
pub const ORG_DETAIL_PATH: &str = "/org/getMyOrgInfo";
pub const CLASS_LIST_PATH: &str = "/clazz/getClass";
pub const CLASS_PROGRESS_PATH: &str = "/record/getOrgLowerClassRecordSummary";
pub const ORG_CLASS_RECORD_PATH: &str = "/record/getOrgClassRecord";

// Local files
pub const CREDENTIALS_FILE: &str = "account.data";
pub const COOKIE_FILE: &str = "cookies.ptk";
pub const DEFAULT_EXPORT_DIR: &str = "导出";
pub const DEFAULT_VAULT_PASSPHRASE: &str = "JiangxiYouthStudyMaker";

// Export column labels
pub const LABEL_ORG_PATH: &str = "组织";
pub const LABEL_STUDY_TIME: &str = "学习时间";
pub const LABEL_NAME: &str = "姓名";
pub const LABEL_BRANCH: &str = "团支部";
pub const LABEL_STUDIED: &str = "已学习人数";
pub const LABEL_TOTAL: &str = "总人数";
pub const LABEL_RATE: &str = "学习率";

/// Hierarchy fields joined into the organization path of finished records.
pub const ORG_PATH_FIELDS: [&str; 4] = ["lev1", "lev2", "lev3", "lev4"];

/// Area id fields probed, in order, when resolving an unfinished record's branch.
pub const AREA_ID_FIELDS: [&str; 5] = ["areaid1", "areaid2", "areaid3", "areaid4", "areaid5"];

/// Internal fields of finished records that are exported hidden.
pub const FINISHED_HIDDEN_FIELDS: [&str; 15] = [
    "id", "classId", "score", "lev1", "lev2", "lev3", "lev4", "userid", "nid", "subOrg", "nid1",
    "nid2", "nid3", "status", "studyTime",
];

// Export titles
pub const TITLE_FINISHED: &str = "完成名单";
pub const TITLE_UNFINISHED: &str = "未完成名单";
pub const TITLE_ORG_SUMMARY: &str = "各团支部完成情况统计";
pub const CURRENT_CLASS_SUFFIX: &str = "（最近一期/当前大学习）";
