//! Closed string enumerations used across the Pyrus API.
//!
//! Types that only appear in server responses carry an `Unknown` variant so a
//! value added on the server side does not fail the whole document. The value
//! shapes of form fields (`Checkmark`, `Flag`, `Status`) are strict.

use serde::{Deserialize, Serialize};

/// Kind of a [`Person`](crate::Person).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    User,
    Bot,
    Role,
    #[serde(other)]
    Unknown,
}

/// External channel a comment was received from or should be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    Email,
    Telegram,
    Facebook,
    Vk,
    Viber,
    MobileApp,
    WebWidget,
    MoySklad,
    Zadarma,
    AmoCrm,
    #[serde(other)]
    Unknown,
}

/// Approval decision of a person on a task step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceType {
    Approved,
    Acknowledged,
    Rejected,
    Revoked,
    Waiting,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Finished,
    Reopened,
    #[serde(other)]
    Unknown,
}

/// Value of a `checkmark` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkmark {
    Checked,
    Unchecked,
}

/// Value of a `flag` field. Unlike [`Checkmark`] it may be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    None,
    Checked,
    Unchecked,
}

/// Value of a `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogHeaderType {
    Text,
    Workflow,
    #[serde(other)]
    Unknown,
}

/// Which side ended a call. Calls API only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectPartyType {
    Agent,
    Client,
    Error,
    Other,
}

/// Outcome of a call. Calls API only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatusType {
    Answered,
    #[serde(rename = "no answer")]
    NoAnswer,
    Busy,
    Error,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallEventType {
    Show,
}
