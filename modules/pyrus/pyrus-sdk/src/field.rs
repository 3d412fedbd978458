//! Form fields and their type-driven value codec.
//!
//! A [`FormField`] carries a `type` tag and a raw `value`. The tag alone decides
//! which [`FieldValue`] shape the value is decoded into. Table rows, titles and
//! multiple choice values contain nested fields, so decoding recurses through
//! the same [`Deserialize`] implementation.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{Checkmark, Flag, Status};
use crate::entries::{CatalogItem, File, Person};
use crate::is_zero;

/// Wire format of `date`, `due_date` and `creation_date` values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format of `time` values.
pub const TIME_FORMAT: &str = "%H:%M";

// ---------------------------------------------------------------------------
// Type tag
// ---------------------------------------------------------------------------

macro_rules! field_types {
    ($( $variant:ident => $wire:literal, )*) => {
        /// Type tag of a form field.
        ///
        /// Tags this library does not know are kept in [`FieldType::Other`]; their
        /// values decode as untyped JSON.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum FieldType {
            $( $variant, )*
            Other(String),
        }

        impl FieldType {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )*
                    Self::Other(tag) => tag,
                }
            }
        }

        impl From<&str> for FieldType {
            fn from(tag: &str) -> Self {
                match tag {
                    $( $wire => Self::$variant, )*
                    other => Self::Other(other.to_owned()),
                }
            }
        }
    };
}

field_types! {
    Text => "text",
    Money => "money",
    Number => "number",
    Date => "date",
    Time => "time",
    Checkmark => "checkmark",
    DueDate => "due_date",
    DueDateTime => "due_date_time",
    Email => "email",
    Phone => "phone",
    Flag => "flag",
    Step => "step",
    Status => "status",
    CreationDate => "creation_date",
    Note => "note",
    Catalog => "catalog",
    File => "file",
    Person => "person",
    Author => "author",
    Table => "table",
    MultipleChoice => "multiple_choice",
    Title => "title",
    FormLink => "form_link",
    Project => "project",
}

impl FieldType {
    /// True for the empty tag used by field updates that only carry an id.
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Other(tag) if tag.is_empty())
    }
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from(tag.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a raw value did not fit the shape required by its tag.
#[derive(Debug, Error)]
pub enum FieldValueError {
    #[error("unexpected value shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("'{input}' is not a valid {expected} value: expected exactly {layout}")]
    Layout {
        expected: &'static str,
        input: String,
        layout: &'static str,
    },

    #[error("'{input}' is not a valid {expected} value: {source}")]
    Temporal {
        expected: &'static str,
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A field value that could not be decoded, with the field it belongs to.
#[derive(Debug, Error)]
#[error("cannot decode value of field {field_id} (type '{field_type}'): {source}")]
pub struct FieldDecodeError {
    pub field_id: i64,
    pub field_type: FieldType,
    #[source]
    pub source: FieldValueError,
}

// ---------------------------------------------------------------------------
// Value shapes
// ---------------------------------------------------------------------------

/// Rows of a `table` field.
pub type Table = Vec<TableRow>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRow {
    pub row_id: i64,
    pub cells: Vec<FormField>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub delete: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Title {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkmark: Option<Checkmark>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultipleChoice {
    pub choice_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choice_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FormField>,
    #[serde(skip_serializing_if = "is_zero")]
    pub choice_id: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLink {
    pub task_ids: Vec<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
}

/// Decoded value of a form field. The variant is chosen by the field's tag.
///
/// Encoding gives back what was decoded, with these normalizations: dates and
/// times use their canonical layouts, timestamps are RFC 3339 with an explicit
/// offset, and whole numbers lose any trailing `.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `text`, `email`, `phone`, `note`
    Text(String),
    /// `money`, `number`
    Number(f64),
    /// `date`, `due_date`, `creation_date`
    Date(NaiveDate),
    Time(NaiveTime),
    /// `due_date_time`
    DateTime(DateTime<FixedOffset>),
    Checkmark(Checkmark),
    Flag(Flag),
    Step(i64),
    Status(Status),
    Catalog(Box<CatalogItem>),
    /// `file`
    Files(Vec<File>),
    /// `person`, `author`
    Person(Box<Person>),
    Table(Table),
    MultipleChoice(Box<MultipleChoice>),
    Title(Box<Title>),
    FormLink(FormLink),
    /// `project` and unknown tags.
    Json(Value),
}

impl FieldValue {
    /// Decodes `raw` using the shape bound to `field_type`.
    ///
    /// # Errors
    /// Returns [`FieldValueError`] when `raw` does not match that shape or a
    /// date/time string does not follow its wire format.
    pub fn decode(field_type: &FieldType, raw: Value) -> Result<Self, FieldValueError> {
        use FieldType as T;

        let value = match field_type {
            T::Text | T::Email | T::Phone | T::Note => Self::Text(serde_json::from_value(raw)?),
            T::Money | T::Number => Self::Number(serde_json::from_value(raw)?),
            T::Date | T::DueDate | T::CreationDate => {
                Self::Date(parse_date(serde_json::from_value(raw)?)?)
            }
            T::Time => Self::Time(parse_time(serde_json::from_value(raw)?)?),
            T::DueDateTime => Self::DateTime(parse_date_time(serde_json::from_value(raw)?)?),
            T::Checkmark => Self::Checkmark(serde_json::from_value(raw)?),
            T::Flag => Self::Flag(serde_json::from_value(raw)?),
            T::Step => Self::Step(serde_json::from_value(raw)?),
            T::Status => Self::Status(serde_json::from_value(raw)?),
            T::Catalog => Self::Catalog(Box::new(serde_json::from_value(raw)?)),
            T::File => Self::Files(serde_json::from_value(raw)?),
            T::Person | T::Author => Self::Person(Box::new(serde_json::from_value(raw)?)),
            T::Table => Self::Table(serde_json::from_value(raw)?),
            T::MultipleChoice => Self::MultipleChoice(Box::new(serde_json::from_value(raw)?)),
            T::Title => Self::Title(Box::new(serde_json::from_value(raw)?)),
            T::FormLink => Self::FormLink(serde_json::from_value(raw)?),
            T::Project | T::Other(_) => Self::Json(raw),
        };
        Ok(value)
    }
}

/// Whether `input` has the fixed-width layout `layout`: digits wherever
/// `layout` has a letter, the same separator everywhere else.
///
/// chrono accepts single-digit months, days, hours and minutes; the wire
/// format does not.
fn fits_layout(input: &str, layout: &str) -> bool {
    input.len() == layout.len()
        && input.bytes().zip(layout.bytes()).all(|(c, l)| {
            if l.is_ascii_alphabetic() {
                c.is_ascii_digit()
            } else {
                c == l
            }
        })
}

fn check_layout(
    input: String,
    expected: &'static str,
    layout: &'static str,
) -> Result<String, FieldValueError> {
    if fits_layout(&input, layout) {
        Ok(input)
    } else {
        Err(FieldValueError::Layout {
            expected,
            input,
            layout,
        })
    }
}

pub(crate) fn parse_date(input: String) -> Result<NaiveDate, FieldValueError> {
    let input = check_layout(input, "date", "YYYY-MM-DD")?;
    NaiveDate::parse_from_str(&input, DATE_FORMAT).map_err(|source| FieldValueError::Temporal {
        expected: "YYYY-MM-DD date",
        input,
        source,
    })
}

fn parse_time(input: String) -> Result<NaiveTime, FieldValueError> {
    let input = check_layout(input, "time", "HH:MM")?;
    NaiveTime::parse_from_str(&input, TIME_FORMAT).map_err(|source| FieldValueError::Temporal {
        expected: "HH:MM time",
        input,
        source,
    })
}

fn parse_date_time(input: String) -> Result<DateTime<FixedOffset>, FieldValueError> {
    DateTime::parse_from_rfc3339(&input).map_err(|source| FieldValueError::Temporal {
        expected: "RFC 3339 timestamp",
        input,
        source,
    })
}

/// Whole numbers within the exactly representable range go out as integers,
/// so `12` is sent back as `12` rather than `12.0`.
fn serialize_number<S: Serializer>(number: f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if number.fract() == 0.0 && number.abs() <= MAX_EXACT {
        serializer.serialize_i64(number as i64)
    } else {
        serializer.serialize_f64(number)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(number) => serialize_number(*number, serializer),
            Self::Date(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            Self::Time(time) => serializer.collect_str(&time.format(TIME_FORMAT)),
            Self::DateTime(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            Self::Checkmark(checkmark) => checkmark.serialize(serializer),
            Self::Flag(flag) => flag.serialize(serializer),
            Self::Step(step) => serializer.serialize_i64(*step),
            Self::Status(status) => status.serialize(serializer),
            Self::Catalog(item) => item.serialize(serializer),
            Self::Files(files) => files.serialize(serializer),
            Self::Person(person) => person.serialize(serializer),
            Self::Table(rows) => rows.serialize(serializer),
            Self::MultipleChoice(choice) => choice.serialize(serializer),
            Self::Title(title) => title.serialize(serializer),
            Self::FormLink(link) => link.serialize(serializer),
            Self::Json(value) => value.serialize(serializer),
        }
    }
}

// ---------------------------------------------------------------------------
// Form field
// ---------------------------------------------------------------------------

/// A form field. Forms and tasks are trees of these.
///
/// `value` is `None` when the server sent no value (or `null`), which is
/// different from an empty string or zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormField {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(rename = "type", skip_serializing_if = "FieldType::is_unspecified")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<FormFieldInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_id: Option<i64>,
}

impl FormField {
    /// A field update addressed by id, as sent in `field_updates`.
    pub fn update(id: i64, value: FieldValue) -> Self {
        Self {
            id,
            value: Some(value),
            ..Self::default()
        }
    }

    /// A field update addressed by name.
    pub fn update_by_name(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
struct RawFormField {
    #[serde(default)]
    id: i64,
    #[serde(rename = "type", default)]
    field_type: FieldType,
    #[serde(default)]
    name: String,
    #[serde(default)]
    info: Option<FormFieldInfo>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    parent_id: Option<i64>,
    #[serde(default)]
    row_id: Option<i64>,
}

impl<'de> Deserialize<'de> for FormField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawFormField::deserialize(deserializer)?;

        let value = match raw.value {
            None => None,
            Some(value) => Some(FieldValue::decode(&raw.field_type, value).map_err(|source| {
                de::Error::custom(FieldDecodeError {
                    field_id: raw.id,
                    field_type: raw.field_type.clone(),
                    source,
                })
            })?),
        };

        Ok(Self {
            id: raw.id,
            field_type: raw.field_type,
            name: raw.name,
            info: raw.info,
            value,
            parent_id: raw.parent_id,
            row_id: raw.row_id,
        })
    }
}

/// Extra information the form template attaches to a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFieldInfo {
    /// Step from which the field must be filled.
    pub required_step: i64,
    /// Step from which the field can no longer be changed.
    pub immutable_step: i64,
    /// `multiple_choice` options.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(skip_serializing_if = "is_zero")]
    pub catalog_id: i64,
    /// `table` columns.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<FormField>,
    /// `title` children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FormField>,
    #[serde(skip_serializing_if = "is_zero")]
    pub decimal_places: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoiceOption {
    pub choice_id: i64,
    pub choice_value: String,
    pub fields: Vec<FormField>,
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<FormField, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_decodes_date_value() {
        let field = decode(json!({"id": 3, "type": "date", "name": "Start", "value": "2024-01-15"}))
            .unwrap();

        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(field.value, Some(FieldValue::Date(expected)));
    }

    #[test]
    fn test_rejects_malformed_date_with_field_context() {
        let err = decode(json!({"id": 3, "type": "date", "value": "2024-13-40"})).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("field 3"), "{message}");
        assert!(message.contains("'date'"), "{message}");
        assert!(message.contains("2024-13-40"), "{message}");
    }

    #[test]
    fn test_absent_and_null_values_stay_unset() {
        let absent = decode(json!({"id": 1, "type": "text", "name": "Comment"})).unwrap();
        assert_eq!(absent.value, None);

        let null = decode(json!({"id": 1, "type": "number", "value": null})).unwrap();
        assert_eq!(null.value, None);
    }

    #[test]
    fn test_empty_string_is_a_value() {
        let field = decode(json!({"id": 1, "type": "text", "value": ""})).unwrap();
        assert_eq!(field.value, Some(FieldValue::Text(String::new())));
    }

    #[test]
    fn test_decodes_multiple_choice_without_nested_fields() {
        let field = decode(json!({
            "id": 9,
            "type": "multiple_choice",
            "value": {"choice_ids": [1, 2], "choice_names": ["A", "B"]}
        }))
        .unwrap();

        let Some(FieldValue::MultipleChoice(choice)) = field.value else {
            panic!("expected a multiple choice value");
        };
        assert_eq!(choice.choice_ids, vec![1, 2]);
        assert_eq!(choice.choice_names, vec!["A", "B"]);
        assert!(choice.fields.is_empty());
    }

    #[test]
    fn test_unknown_tags_fall_back_to_json() {
        let field = decode(json!({"id": 5, "type": "signature", "value": {"strokes": [1, 2]}}))
            .unwrap();

        assert_eq!(field.field_type, FieldType::Other("signature".to_owned()));
        assert_eq!(field.value, Some(FieldValue::Json(json!({"strokes": [1, 2]}))));
    }

    #[test]
    fn test_project_values_are_untyped() {
        let field = decode(json!({"id": 5, "type": "project", "value": [{"id": 1}]})).unwrap();
        assert_eq!(field.value, Some(FieldValue::Json(json!([{"id": 1}]))));
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        assert!(decode(json!({"id": 2, "type": "number", "value": "12"})).is_err());
        assert!(decode(json!({"id": 2, "type": "checkmark", "value": "maybe"})).is_err());
        assert!(decode(json!({"id": 2, "type": "step", "value": "two"})).is_err());
        assert!(decode(json!({"id": 2, "type": "time", "value": "25:61"})).is_err());
        assert!(decode(json!({"id": 2, "type": "date", "value": "2024-1-5"})).is_err());
        assert!(decode(json!({"id": 2, "type": "due_date", "value": "2024-01-15 "})).is_err());
        assert!(decode(json!({"id": 2, "type": "time", "value": "9:5"})).is_err());
        assert!(decode(json!({"id": 2, "type": "time", "value": "09:30:00"})).is_err());
        assert!(decode(json!({"id": 2, "type": "due_date_time", "value": "2024-01-15"})).is_err());
    }

    #[test]
    fn test_decodes_nested_table_cells() {
        let field = decode(json!({
            "id": 10,
            "type": "table",
            "value": [
                {"row_id": 0, "cells": [
                    {"id": 11, "type": "date", "value": "2023-05-01"},
                    {"id": 12, "type": "person", "value": {"id": 77, "first_name": "Ann"}}
                ]},
                {"row_id": 1, "cells": [], "delete": true}
            ]
        }))
        .unwrap();

        let Some(FieldValue::Table(rows)) = field.value else {
            panic!("expected a table value");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows[1].delete);
        assert_eq!(
            rows[0].cells[0].value,
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()))
        );
        let Some(FieldValue::Person(person)) = &rows[0].cells[1].value else {
            panic!("expected person cell");
        };
        assert_eq!(person.id, 77);
    }

    #[test]
    fn test_nested_decode_errors_surface() {
        let err = decode(json!({
            "id": 20,
            "type": "title",
            "value": {"checkmark": "checked", "fields": [
                {"id": 21, "type": "money", "value": "lots"}
            ]}
        }))
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("field 20"), "{message}");
        assert!(message.contains("field 21"), "{message}");
    }

    #[test]
    fn test_decodes_choice_option_fields_in_info() {
        let field = decode(json!({
            "id": 30,
            "type": "multiple_choice",
            "name": "Kind",
            "info": {
                "required_step": 1,
                "options": [
                    {"choice_id": 1, "choice_value": "Other", "fields": [
                        {"id": 31, "type": "text", "name": "Details"}
                    ]}
                ]
            }
        }))
        .unwrap();

        let info = field.info.unwrap();
        assert_eq!(info.required_step, 1);
        assert_eq!(info.options[0].fields[0].id, 31);
        assert_eq!(field.value, None);
    }

    #[test]
    fn test_values_survive_reencoding() {
        let cases = [
            json!({"id": 1, "type": "email", "value": "a@b.io"}),
            json!({"id": 2, "type": "money", "value": 12.5}),
            json!({"id": 3, "type": "flag", "value": "none"}),
            json!({"id": 4, "type": "status", "value": "closed"}),
            json!({"id": 5, "type": "step", "value": 3}),
            json!({"id": 6, "type": "catalog", "value": {"item_id": 8, "headers": ["Name"], "values": ["X"]}}),
            json!({"id": 7, "type": "file", "value": [{"id": 1, "name": "a.txt", "size": 4}]}),
            json!({"id": 8, "type": "form_link", "value": {"task_ids": [5], "subject": "Parent"}}),
            json!({"id": 9, "type": "time", "value": "09:30"}),
            json!({"id": 10, "type": "creation_date", "value": "2020-02-29"}),
            json!({"id": 11, "type": "text", "value": "Invoice 42"}),
            json!({"id": 12, "type": "number", "value": 12}),
            json!({"id": 13, "type": "number", "value": -3.25}),
            json!({"id": 14, "type": "money", "value": 1500}),
            json!({"id": 15, "type": "date", "value": "2024-01-05"}),
            json!({"id": 16, "type": "due_date", "value": "2024-12-31"}),
            json!({"id": 17, "type": "checkmark", "value": "unchecked"}),
            json!({"id": 18, "type": "phone", "value": "+1 555 0100"}),
            json!({"id": 19, "type": "note", "value": ""}),
            json!({"id": 20, "type": "person", "value": {"id": 77, "first_name": "Ann", "last_name": "Lee", "email": "ann@example.com"}}),
            json!({"id": 21, "type": "author", "value": {"id": 78, "first_name": "Bob"}}),
            json!({"id": 22, "type": "catalog", "value": {"item_ids": [1, 2], "headers": ["Name"], "rows": [["A"], ["B"]]}}),
            json!({"id": 23, "type": "table", "value": [
                {"row_id": 0, "cells": [
                    {"id": 24, "type": "date", "value": "2023-05-01"},
                    {"id": 25, "type": "number", "value": 4}
                ]},
                {"row_id": 1, "cells": [], "delete": true}
            ]}),
            json!({"id": 26, "type": "multiple_choice", "value": {"choice_ids": [2], "choice_names": ["Urgent"], "choice_id": 2}}),
            json!({"id": 27, "type": "multiple_choice", "value": {"choice_ids": [3], "fields": [
                {"id": 28, "type": "text", "value": "details"}
            ]}}),
            json!({"id": 29, "type": "title", "value": {"checkmark": "checked", "fields": [
                {"id": 30, "type": "money", "value": 7.5}
            ]}}),
            json!({"id": 31, "type": "project", "value": {"projects": [{"id": 5}]}}),
            json!({"id": 32, "type": "signature", "value": {"anything": [1, "two"]}}),
        ];

        for case in cases {
            let field = decode(case.clone()).unwrap();
            let encoded = serde_json::to_value(&field).unwrap();
            assert_eq!(encoded["value"], case["value"], "case {case}");
            assert_eq!(decode(encoded).unwrap(), field);
        }
    }

    #[test]
    fn test_date_time_is_normalized_on_encode() {
        let field = decode(json!({"id": 1, "type": "due_date_time", "value": "2024-01-15T10:00:00Z"}))
            .unwrap();

        let encoded = serde_json::to_value(&field).unwrap();
        assert_eq!(encoded["value"], json!("2024-01-15T10:00:00+00:00"));
        assert_eq!(decode(encoded).unwrap(), field);
    }

    #[test]
    fn test_field_update_omits_empty_identity() {
        let update = FormField::update(42, FieldValue::Checkmark(Checkmark::Checked));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"id": 42, "value": "checked"})
        );

        let by_name = FormField::update_by_name("Amount", FieldValue::Number(3.0));
        assert_eq!(
            serde_json::to_value(&by_name).unwrap(),
            json!({"name": "Amount", "value": 3})
        );
    }
}
