//! Domain data types
//!
//! - [`http`]: transport-neutral request/response shapes and the cookie jar
//! - [`auth`]: credentials and the authenticated session
//! - [`record`]: sparse records, entity ids and paged listings
//! - [`org`]: organization, class and progress summaries
//! - [`export`]: normalized tables handed to the export sink

pub mod auth;
pub mod export;
pub mod http;
pub mod org;
pub mod record;

pub use auth::{Credentials, Session};
pub use export::{Column, ExportFileName, ExportTable};
pub use http::{ApiRequest, ApiResponse, CookieJar, Envelope, HttpMethod};
pub use org::{ClassCatalog, ClassInfo, ClassProgress, OrgDetail, OrgHierarchy, OrgNumbers, OrgSummary};
pub use record::{value_text, EntityId, Page, PageRequest, Record, RecordListing};
