//! Pre-flight checks for request bodies.
//!
//! These catch the mistakes the server would reject anyway (conflicting
//! identities, malformed dates) before any network I/O happens.

use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::entries::Person;
use crate::field::{FormField, parse_date};
use crate::requests::{Attachment, RegisterCallRequest, TaskCommentRequest, TaskRequest};

/// Longest task duration accepted by the server, in minutes (one year).
pub const MAX_DURATION_MINUTES: i64 = 365 * 24 * 60;

/// First rule a request broke. `field` is a path such as `participants[1].email`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn within(mut self, parent: &str) -> Self {
        self.field = format!("{parent}.{}", self.field);
        self
    }
}

pub trait Validate {
    /// # Errors
    /// Returns the first violated rule.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn check(ok: bool, field: &str, message: &str) -> Result<(), ValidationError> {
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new(field, message))
    }
}

fn each<T: Validate>(items: &[T], field: &str) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|err| err.within(&format!("{field}[{index}]")))?;
    }
    Ok(())
}

fn each_step(steps: &[Vec<Person>], field: &str) -> Result<(), ValidationError> {
    for (index, step) in steps.iter().enumerate() {
        each(step, &format!("{field}[{index}]"))?;
    }
    Ok(())
}

fn is_date(value: &str) -> bool {
    parse_date(value.to_owned()).is_ok()
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

fn check_due(
    due_set: bool,
    due_date: &str,
    duration: i64,
) -> Result<(), ValidationError> {
    check(
        !(due_set && !due_date.is_empty()),
        "due",
        "use due or due_date, not both",
    )?;
    check(duration == 0 || due_set, "due", "duration requires due")?;
    check(
        due_date.is_empty() || is_date(due_date),
        "due_date",
        "must be a date in YYYY-MM-DD format",
    )
}

impl Validate for Person {
    fn validate(&self) -> Result<(), ValidationError> {
        match (self.id != 0, !self.email.is_empty()) {
            (true, true) => return Err(ValidationError::new("id", "use id or email, not both")),
            (false, false) => return Err(ValidationError::new("id", "use either id or email")),
            _ => {}
        }
        check(
            self.email.is_empty() || is_email(&self.email),
            "email",
            "must be a valid email address",
        )
    }
}

impl Validate for Attachment {
    fn validate(&self) -> Result<(), ValidationError> {
        let sources = [
            !self.guid.is_empty(),
            self.attachment_id != 0,
            !self.url.is_empty(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count();

        check(
            sources <= 1,
            "guid",
            "use guid, attachment_id or url, but not simultaneously",
        )?;
        check(sources == 1, "guid", "use either guid, attachment_id or url")?;
        check(
            self.root_id == 0 || !self.guid.is_empty(),
            "root_id",
            "root_id requires guid",
        )?;
        check(
            self.name.is_empty() || !self.url.is_empty(),
            "name",
            "name requires url",
        )?;
        check(
            self.guid.is_empty() || Uuid::parse_str(&self.guid).is_ok(),
            "guid",
            "must be a valid UUID",
        )?;
        check(
            self.url.is_empty() || Url::parse(&self.url).is_ok(),
            "url",
            "must be a valid URL",
        )
    }
}

impl Validate for FormField {
    fn validate(&self) -> Result<(), ValidationError> {
        match (self.id != 0, !self.name.is_empty()) {
            (true, true) => return Err(ValidationError::new("id", "use id or name, not both")),
            (false, false) => return Err(ValidationError::new("id", "use either id or name")),
            _ => {}
        }
        check(self.value.is_some(), "value", "cannot be blank")
    }
}

impl Validate for TaskRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        match (!self.text.is_empty(), self.form_id != 0) {
            (true, true) => {
                return Err(ValidationError::new("text", "use text or form_id, not both"));
            }
            (false, false) => {
                return Err(ValidationError::new("text", "use either text or form_id"));
            }
            _ => {}
        }
        check_due(self.due.is_some(), &self.due_date, self.duration)?;
        check(
            (0..=MAX_DURATION_MINUTES).contains(&self.duration),
            "duration",
            "must be between 0 and one year in minutes",
        )?;
        check(
            self.scheduled_date.is_empty() || is_date(&self.scheduled_date),
            "scheduled_date",
            "must be a date in YYYY-MM-DD format",
        )?;
        if let Some(responsible) = &self.responsible {
            responsible.validate().map_err(|err| err.within("responsible"))?;
        }
        each(&self.participants, "participants")?;
        each(&self.subscribers, "subscribers")?;
        each_step(&self.approvals, "approvals")?;
        each(&self.attachments, "attachments")
    }
}

impl Validate for TaskCommentRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_due(self.due.is_some(), &self.due_date, self.duration)?;
        check(
            self.scheduled_date.is_empty() || is_date(&self.scheduled_date),
            "scheduled_date",
            "must be a date in YYYY-MM-DD format",
        )?;
        if let Some(reassign_to) = &self.reassign_to {
            reassign_to.validate().map_err(|err| err.within("reassign_to"))?;
        }
        each_step(&self.approvals_added, "approvals_added")?;
        each_step(&self.approvals_removed, "approvals_removed")?;
        each_step(&self.approvals_rerequested, "approvals_rerequested")?;
        each(&self.subscribers_added, "subscribers_added")?;
        each(&self.subscribers_removed, "subscribers_removed")?;
        each(&self.subscribers_rerequested, "subscribers_rerequested")?;
        each(&self.participants_added, "participants_added")?;
        each(&self.participants_removed, "participants_removed")?;
        each(&self.field_updates, "field_updates")?;
        each(&self.attachments, "attachments")
    }
}

impl Validate for RegisterCallRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check(!self.from.is_empty(), "from", "cannot be blank")?;
        check(
            !self.integration_guid.is_empty(),
            "integration_guid",
            "cannot be blank",
        )
    }
}
