//! Request bodies. Zero-valued optional fields are left off the wire.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::constants::{
    ActionType, CallEventType, CallStatusType, ChoiceType, DisconnectPartyType,
};
use crate::entries::{CatalogItem, Channel, Person};
use crate::field::FormField;
use crate::is_zero;

/// Creates a task, either a simple one from `text` or a form task from `form_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<Person>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub due_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    /// Minutes, only together with `due`.
    #[serde(skip_serializing_if = "is_zero")]
    pub duration: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscribers: Vec<Person>,
    #[serde(skip_serializing_if = "is_zero")]
    pub parent_task_id: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scheduled_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_datetime_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approvals: Vec<Vec<Person>>,
    #[serde(skip_serializing_if = "is_zero")]
    pub form_id: i64,
    /// Initial values of form fields.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FormField>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fill_defaults: bool,
}

/// A file attached to a task or comment: a freshly uploaded file (`guid`),
/// an existing attachment (`attachment_id`) or a link (`url`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub root_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub attachment_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Adds a comment to a task. Besides text a comment may change fields,
/// approvals, participants and the task schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskCommentRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub due_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_zero")]
    pub duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_choice: Option<ChoiceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reassign_to: Option<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approvals_added: Vec<Vec<Person>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approvals_removed: Vec<Vec<Person>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approvals_rerequested: Vec<Vec<Person>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscribers_added: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscribers_removed: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscribers_rerequested: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants_added: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants_removed: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_updates: Vec<FormField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_list_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_list_ids: Vec<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scheduled_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_datetime_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancel_schedule: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    #[serde(skip_serializing_if = "is_zero")]
    pub spent_minutes: i64,
}

/// Registry query over the tasks of one form.
///
/// `field_filters` maps a field id to a filter expression (for example
/// `"gt5"` or `"1,2"`); each entry is sent as a `fld<id>` key next to the
/// other parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistryRequest {
    pub field_filters: BTreeMap<i64, String>,

    pub steps: i64,
    pub include_archived: bool,
    pub field_ids: Vec<i64>,
    pub format: String,
    pub delimiter: String,
    pub encoding: String,
    pub simple_format: bool,
    pub modified_before: Option<DateTime<Utc>>,
    pub modified_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub created_after: Option<DateTime<Utc>>,
    pub closed_before: Option<DateTime<Utc>>,
    pub closed_after: Option<DateTime<Utc>>,
}

const YES: &str = "y";

impl Serialize for RegistryRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        if self.steps != 0 {
            map.serialize_entry("steps", &self.steps)?;
        }
        if self.include_archived {
            map.serialize_entry("include_archived", YES)?;
        }
        if !self.field_ids.is_empty() {
            map.serialize_entry("field_ids", &self.field_ids)?;
        }
        for (key, value) in [
            ("format", &self.format),
            ("delimiter", &self.delimiter),
            ("encoding", &self.encoding),
        ] {
            if !value.is_empty() {
                map.serialize_entry(key, value)?;
            }
        }
        if self.simple_format {
            map.serialize_entry("simple_format", YES)?;
        }
        for (key, value) in [
            ("modified_before", &self.modified_before),
            ("modified_after", &self.modified_after),
            ("created_before", &self.created_before),
            ("created_after", &self.created_after),
            ("closed_before", &self.closed_before),
            ("closed_after", &self.closed_after),
        ] {
            if let Some(ts) = value {
                map.serialize_entry(key, ts)?;
            }
        }

        for (field_id, filter) in &self.field_filters {
            map.serialize_entry(&format!("fld{field_id}"), filter)?;
        }

        map.end()
    }
}

/// Creates or updates an organization member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MemberRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub position: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub department_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub skype: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
}

/// Registers a telephony call. `from` and `integration_guid` are required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RegisterCallRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub to: String,
    pub from: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension: String,
    pub integration_guid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub call_guid: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub task_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AddCallDetailsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_zero")]
    pub rating: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disconnect_party: Option<DisconnectPartyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_status: Option<CallStatusType>,
    /// Guid of the uploaded call recording.
    pub file_guid: String,
}

// ---------------------------------------------------------------------------
// Bodies assembled by the client from method arguments
// ---------------------------------------------------------------------------

fn is_blank(value: &&str) -> bool {
    value.is_empty()
}

fn is_empty_ids(ids: &&[i64]) -> bool {
    ids.is_empty()
}

#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub login: &'a str,
    pub security_key: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CatalogRequest<'a> {
    pub name: &'a str,
    pub catalog_headers: &'a [String],
    pub items: &'a [CatalogItem],
}

#[derive(Debug, Serialize)]
pub struct SyncCatalogRequest<'a> {
    pub apply: bool,
    pub catalog_headers: &'a [String],
    pub items: &'a [CatalogItem],
}

#[derive(Debug, Serialize)]
pub struct RoleRequest<'a> {
    pub name: &'a str,
    pub member_add: &'a [i64],
}

#[derive(Debug, Serialize)]
pub struct RoleUpdateRequest<'a> {
    #[serde(skip_serializing_if = "is_blank")]
    pub name: &'a str,
    #[serde(skip_serializing_if = "is_empty_ids")]
    pub member_add: &'a [i64],
    #[serde(skip_serializing_if = "is_empty_ids")]
    pub member_remove: &'a [i64],
    pub banned: bool,
}

#[derive(Debug, Serialize)]
pub struct RegisterCallEventRequest<'a> {
    pub event_type: CallEventType,
    #[serde(skip_serializing_if = "is_blank")]
    pub extension: &'a str,
}
