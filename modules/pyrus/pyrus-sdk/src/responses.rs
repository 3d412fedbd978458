use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entries::{
    CatalogHeader, CatalogItem, Member, Organization, PrintForm, Role, Task, TaskHeader, TaskList,
    TaskWithComments,
};
use crate::field::FormField;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    pub access_token: String,
}

/// A form template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormResponse {
    pub id: i64,
    pub name: String,
    /// Step number to step name.
    pub steps: BTreeMap<i64, String>,
    pub fields: Vec<FormField>,
    pub deleted_or_closed: bool,
    pub print_forms: Vec<PrintForm>,
    pub folder: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsResponse {
    pub forms: Vec<FormResponse>,
}

/// Tasks created from a form template. `csv` is filled instead of `tasks`
/// when the registry was requested in CSV format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRegisterResponse {
    pub tasks: Vec<Task>,
    pub csv: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskResponse {
    pub task: Option<TaskWithComments>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsResponse {
    pub organizations: Vec<Organization>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogsResponse {
    pub catalogs: Vec<CatalogResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogResponse {
    pub catalog_id: i64,
    pub name: String,
    pub version: i64,
    pub supervisors: Vec<i64>,
    pub deleted: bool,
    pub external_version: i64,
    pub catalog_headers: Vec<CatalogHeader>,
    pub items: Vec<CatalogItem>,
}

/// Identifies an uploaded file. Pass `guid` in an attachment to use it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub guid: String,
    pub md5_hash: String,
}

/// A downloaded file, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadResponse {
    pub filename: String,
    pub raw_file: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListsResponse {
    pub lists: Vec<TaskList>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskHeader>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncCatalogResponse {
    pub apply: bool,
    pub added: Vec<CatalogItem>,
    pub deleted: Vec<CatalogItem>,
    pub updated: Vec<CatalogItem>,
    pub catalog_headers: Vec<CatalogHeader>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MembersResponse {
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RolesResponse {
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileResponse {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub locale: String,
    pub organization_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterCallResponse {
    pub call_guid: String,
    pub task_id: String,
}

/// Payload of a webhook delivery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub event: String,
    /// Token the receiver may use to act on behalf of the bot.
    pub access_token: String,
    pub task_id: i64,
    pub user_id: i64,
    pub task: Option<TaskWithComments>,
}
