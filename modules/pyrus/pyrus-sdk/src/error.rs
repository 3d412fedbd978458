use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error envelope returned by every Pyrus endpoint on failure.
///
/// `message` is only filled in by the server for 404 responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("API error: {description} ({code})")]
pub struct ApiError {
    #[serde(rename = "error_code", default)]
    pub code: ErrorCode,
    #[serde(rename = "error", default)]
    pub description: String,
    #[serde(rename = "Message", default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl ApiError {
    /// Whether the server rejected the access token.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::TokenNotSpecified
                | ErrorCode::RevokedToken
                | ErrorCode::ExpiredToken
                | ErrorCode::InvalidToken
                | ErrorCode::AuthorizationError
        )
    }
}

macro_rules! error_codes {
    ($( $(#[$doc:meta])* $variant:ident => $wire:literal, )*) => {
        /// Machine-readable error code of an [`ApiError`].
        ///
        /// Codes unknown to this library are kept verbatim in [`ErrorCode::Other`].
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $( $(#[$doc])* $variant, )*
            Other(String),
        }

        impl ErrorCode {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )*
                    Self::Other(code) => code,
                }
            }
        }

        impl From<&str> for ErrorCode {
            fn from(code: &str) -> Self {
                match code {
                    $( $wire => Self::$variant, )*
                    other => Self::Other(other.to_owned()),
                }
            }
        }
    };
}

error_codes! {
    /// Internal server error. Contact support if it persists.
    ServerError => "server_error",
    /// Wrong login or security key.
    InvalidCredentials => "invalid_credentials",
    TokenNotSpecified => "token_not_specified",
    RevokedToken => "revoked_token",
    ExpiredToken => "expired_token",
    InvalidToken => "invalid_token",
    AuthorizationError => "authorization_error",
    /// The account that issued the request is blocked.
    AccountBlocked => "account_blocked",
    InvalidFieldId => "invalid_field_id",
    DeletedField => "deleted_field",
    InvalidFieldName => "invalid_field_name",
    InvalidFieldIdName => "invalid_field_id_name",
    /// Field name is ambiguous within the form; address the field by id.
    NonUniqueName => "non_unique_name",
    FieldIdentityMissing => "field_identity_missing",
    /// The same field is modified more than once in one request.
    DuplicateField => "duplicate_field",
    InvalidCatalogId => "invalid_catalog_id",
    InvalidCatalogItemName => "invalid_catalog_item_name",
    NonUniqueCatalogItemName => "non_unique_catalog_item_name",
    InvalidCatalogItemId => "invalid_catalog_item_id",
    CatalogItemIdNameMismatch => "catalog_item_id_name_mismatch",
    InvalidEmail => "invalid_email",
    NonUniqueEmail => "non_unique_email",
    InvalidPersonId => "invalid_person_id",
    InvalidPersonIdEmail => "invalid_person_id_email",
    FormHasNoTask => "form_has_no_task",
    UnrecognizedAttachmentId => "unrecognized_attachment_id",
    /// A required form field is missing; the description names it.
    RequiredFieldMissing => "required_field_missing",
    TypeIsNotSupported => "type_is_not_supported",
    CatalogIdentityMissing => "catalog_identity_missing",
    IncorrectParametersCount => "incorrect_parameters_count",
    FilterTypeIsNotSupported => "filter_type_is_not_supported",
    StepFieldDoesNotExists => "step_field_does_not_exists",
    CatalogItemIdMissing => "catalog_item_id_missing",
    PersonIdentityMissing => "person_identity_missing",
    EitherDueDateOrDueCanBeSet => "either_due_date_or_due_can_be_set",
    NegativeDuration => "negative_duration",
    /// Duration exceeds one year.
    DurationIsTooLong => "duration_is_too_long",
    DueMissing => "due_missing",
    ScheduledDateInPast => "scheduled_date_in_past",
    CannotAddFormProject => "cannot_add_form_project",
    FormTemplateCantBeRemovedFromTask => "form_template_cant_be_removed_from_task",
    NoFileInRequest => "no_file_in_request",
    /// Attachment exceeds the 250MB upload limit.
    TooLargeRequestLength => "too_large_request_length",
    RequiredParameterMissing => "required_parameter_missing",
    TooManyTaskSteps => "too_many_task_steps",
    InvalidValueFormat => "invalid_value_format",
    /// A task cannot hold more than 10000 comments.
    TooManyComments => "too_many_comments",
    InvalidStepNumber => "invalid_step_number",
    TaskLimitExceeded => "task_limit_exceeded",
    /// Table cells can only be changed through their table.
    FieldIsInTable => "field_is_in_table",
    RequiredTableFieldMissing => "required_table_field_missing",
    DepartmentCatalogCanNotBeModified => "department_catalog_can_not_be_modified",
    CatalogDuplicateRows => "catalog_duplicate_rows",
    EmptyCatalogHeaders => "empty_catalog_headers",
    CanNotModifyDeletedCatalog => "can_not_modify_deleted_catalog",
    CanNotModifyFirstColumn => "can_not_modify_first_column",
    CatalogHeadersItemsMismatch => "catalog_headers_items_mismatch",
    /// A catalog cannot hold more than 15000 items.
    TooManyCatalogItems => "too_many_catalog_items",
    CatalogItemMaxLengthExceeded => "catalog_item_max_length_exceeded",
    CatalogDuplicateHeaders => "catalog_duplicate_headers",
    FormIdMissing => "form_id_missing",
    TextMissing => "text_missing",
    InvalidJson => "invalid_json",
    EmptyBody => "empty_body",
    AccessDeniedProject => "access_denied_project",
    AccessDeniedTask => "access_denied_task",
    AccessDeniedCloseTask => "access_denied_close_task",
    AccessDeniedReopenTask => "access_denied_reopen_task",
    AccessDeniedCatalog => "access_denied_catalog",
    AccessDeniedForm => "access_denied_form",
    AccessDeniedPerson => "access_denied_person",
    /// Request quota for the current 10 minute window is exhausted.
    TooManyRequests => "too_many_requests",
    EmptyFile => "empty_file",
    BadMultipartContent => "bad_multipart_content",
    InvalidTableRow => "invalid_table_row",
    CannotAddExternalUser => "cannot_add_external_user",
    UnrecognizedIntegrationGuid => "unrecognized_integration_guid",
    UnrecognizedCallGuid => "unrecognized_call_guid",
    UnsupportedAttachmentFormat => "unsupported_attachment_format",
}

impl Default for ErrorCode {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from(code.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_error_envelope() {
        let err: ApiError = serde_json::from_value(json!({
            "error_code": "expired_token",
            "error": "Token has expired"
        }))
        .unwrap();

        assert_eq!(err.code, ErrorCode::ExpiredToken);
        assert!(err.is_auth_error());
        assert_eq!(err.to_string(), "API error: Token has expired (expired_token)");
    }

    #[test]
    fn test_keeps_not_found_message() {
        let err: ApiError = serde_json::from_value(json!({
            "Message": "No HTTP resource was found"
        }))
        .unwrap();

        assert_eq!(err.code, ErrorCode::Other(String::new()));
        assert_eq!(err.message, "No HTTP resource was found");
    }

    #[test]
    fn test_unknown_codes_are_preserved() {
        let code: ErrorCode = serde_json::from_value(json!("brand_new_code")).unwrap();
        assert_eq!(code, ErrorCode::Other("brand_new_code".to_owned()));
        assert_eq!(serde_json::to_value(&code).unwrap(), json!("brand_new_code"));
    }
}
