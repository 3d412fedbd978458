//! Data model of the Pyrus task and workflow API.
//!
//! This crate has no I/O. It defines the shapes exchanged with the server,
//! the form field value codec and request validation. The HTTP client lives
//! in `pyrus-client`.
//!
//! Form fields are the interesting part: a field's `type` tag decides how its
//! `value` is decoded, and several value shapes contain nested fields.
//!
//! ```
//! use pyrus_sdk::{FieldValue, FormField};
//!
//! let field: FormField = serde_json::from_str(
//!     r#"{"id": 4, "type": "date", "name": "Deadline", "value": "2024-01-15"}"#,
//! )?;
//! assert!(matches!(field.value, Some(FieldValue::Date(_))));
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod constants;
pub mod entries;
pub mod error;
pub mod field;
pub mod requests;
pub mod responses;
pub mod validation;

pub use constants::{
    ActionType, CallEventType, CallStatusType, CatalogHeaderType, ChannelType, Checkmark,
    ChoiceType, DisconnectPartyType, Flag, PersonType, Status,
};
pub use entries::{
    Approval, CatalogHeader, CatalogItem, Channel, ChannelUser, File, Member, Organization,
    Person, PrintForm, Role, Subscriber, Task, TaskComment, TaskHeader, TaskList,
    TaskWithComments,
};
pub use error::{ApiError, ErrorCode};
pub use field::{
    ChoiceOption, FieldDecodeError, FieldType, FieldValue, FieldValueError, FormField,
    FormFieldInfo, FormLink, MultipleChoice, Table, TableRow, Title,
};
pub use requests::{
    AddCallDetailsRequest, Attachment, MemberRequest, RegisterCallRequest, RegistryRequest,
    TaskCommentRequest, TaskRequest,
};
pub use responses::{
    AuthResponse, CatalogResponse, CatalogsResponse, ContactsResponse, DownloadResponse, Event,
    FormRegisterResponse, FormResponse, FormsResponse, ListsResponse, MembersResponse,
    ProfileResponse, RegisterCallResponse, RolesResponse, SyncCatalogResponse, TaskListResponse,
    TaskResponse, UploadResponse,
};
pub use validation::{Validate, ValidationError};

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}
