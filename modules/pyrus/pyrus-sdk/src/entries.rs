//! Entities returned by the API: tasks, comments, people, catalogs, lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ActionType, CatalogHeaderType, ChannelType, ChoiceType, PersonType,
};
use crate::field::FormField;
use crate::is_zero;

/// A Pyrus user, bot or role.
///
/// When used as a reference inside a request only `id` or `email` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub person_type: Option<PersonType>,
    #[serde(skip_serializing_if = "is_zero")]
    pub department_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub department_name: String,
}

impl Person {
    pub fn by_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

/// File attached to a task, a comment or a `file` field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub size: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub md5: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub version: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub root_id: i64,
}

/// Basic task information, as returned by task lists and the inbox.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskHeader {
    pub id: i64,
    pub create_date: DateTime<Utc>,
    pub last_modified_date: Option<DateTime<Utc>>,
    pub close_date: Option<DateTime<Utc>>,
    pub author: Option<Person>,
    pub text: String,
    pub responsible: Option<Person>,
}

/// A task without its comments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(flatten)]
    pub header: TaskHeader,

    pub attachments: Vec<File>,
    pub list_ids: Vec<i64>,
    pub parent_task_id: i64,
    pub linked_task_ids: Vec<i64>,
    pub last_note_id: i64,
    pub subject: String,
    pub scheduled_date: String,
    pub scheduled_datetime_utc: Option<DateTime<Utc>>,
    pub subscribers: Vec<Subscriber>,

    pub due_date: String,
    pub due: Option<DateTime<Utc>>,
    pub duration: i64,
    pub participants: Vec<Person>,

    pub form_id: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FormField>,
    /// Approvers grouped by step.
    pub approvals: Vec<Vec<Approval>>,
    pub current_step: i64,
}

impl Task {
    /// Finds a top-level form field by id.
    pub fn field(&self, id: i64) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// A task together with its full comment history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskWithComments {
    #[serde(flatten)]
    pub task: Task,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<TaskComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Approval {
    pub person: Option<Person>,
    pub step: i64,
    pub approval_choice: Option<ChoiceType>,
}

/// A person watching a task without taking part in its approval.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscriber {
    pub person: Option<Person>,
    pub approval_choice: Option<ChoiceType>,
}

/// One entry of a task history. Besides text it carries every update made
/// to the task in that step: field changes, approvals, reassignments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskComment {
    pub id: i64,
    pub text: String,
    pub create_date: DateTime<Utc>,
    pub author: Option<Person>,
    pub attachments: Vec<File>,
    pub action: Option<ActionType>,
    pub added_list_ids: Vec<i64>,
    pub removed_list_ids: Vec<i64>,
    pub comment_as_roles: Vec<Role>,
    pub subject: String,
    pub scheduled_date: String,
    pub scheduled_datetime_utc: Option<DateTime<Utc>>,
    pub cancel_schedule: bool,
    pub spent_minutes: i64,
    pub subscribers_added: Vec<Person>,
    pub subscribers_removed: Vec<Person>,
    pub subscribers_rerequested: Vec<Person>,

    pub reassigned_to: Option<Person>,
    pub participants_added: Vec<Person>,
    pub participants_removed: Vec<Person>,
    pub due_date: String,
    pub due: Option<DateTime<Utc>>,
    pub duration: i64,

    pub field_updates: Vec<FormField>,
    pub approval_choice: Option<ChoiceType>,
    pub approval_step: i64,
    pub reset_to_step: i64,
    pub changed_step: i64,
    pub approvals_added: Vec<Vec<Approval>>,
    pub approvals_removed: Vec<Vec<Approval>>,
    pub approvals_rerequested: Vec<Vec<Approval>>,
    pub channel: Option<Channel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub persons: Vec<Person>,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub member_ids: Vec<i64>,
    pub external_id: i64,
    pub banned: bool,
}

/// A catalog row: header names with the matching values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    #[serde(skip_serializing_if = "is_zero")]
    pub item_id: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub item_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Vec<String>>,
}

/// A catalog column such as "Name" or "Email".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHeader {
    pub name: String,
    #[serde(rename = "type")]
    pub header_type: CatalogHeaderType,
}

/// External channel of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<ChannelUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelUser>,
}

/// Recipient or sender of a channel message. `email` is only used by the
/// email channel, `name` by all others.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelUser {
    pub name: String,
    pub email: String,
}

/// A task list. Lists nest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskList {
    pub id: i64,
    pub name: String,
    pub children: Vec<TaskList>,
}

/// A member of the organization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub person_type: Option<PersonType>,
    pub banned: bool,
    pub position: String,
    pub skype: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintForm {
    #[serde(rename = "print_form_id")]
    pub id: i64,
    #[serde(rename = "print_form_name")]
    pub name: String,
}
