//! Shared validation helpers for inbound HTTP adapters.

use pagination::{Cursor, PageSize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, OrderStatus, Quantity};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidQuantity,
    InvalidStatus,
    InvalidPageSize,
    InvalidCursor,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidQuantity => "invalid_quantity",
            ErrorCode::InvalidStatus => "invalid_status",
            ErrorCode::InvalidPageSize => "invalid_page_size",
            ErrorCode::InvalidCursor => "invalid_cursor",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: Option<String>,
) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".into(), json!(value));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str().to_owned();
    field_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
        None,
    )
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_id(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        field_error(
            field,
            format!("Invalid id '{value}' provided."),
            ErrorCode::InvalidId,
            Some(value.to_owned()),
        )
    })
}

pub(crate) fn parse_quantity(value: i64, field: FieldName) -> Result<Quantity, Error> {
    Quantity::new(value).map_err(|err| {
        field_error(
            field,
            err.to_string(),
            ErrorCode::InvalidQuantity,
            Some(value.to_string()),
        )
    })
}

pub(crate) fn parse_status(value: &str, field: FieldName) -> Result<OrderStatus, Error> {
    value.parse().map_err(|_| {
        field_error(
            field,
            format!("{} must be one of cart, processing, shipped or delivered", field.as_str()),
            ErrorCode::InvalidStatus,
            Some(value.to_owned()),
        )
    })
}

pub(crate) fn parse_page_size(value: Option<u32>, field: FieldName) -> Result<PageSize, Error> {
    match value {
        None => Ok(PageSize::default()),
        Some(raw) => PageSize::new(raw).map_err(|err| {
            field_error(
                field,
                err.to_string(),
                ErrorCode::InvalidPageSize,
                Some(raw.to_string()),
            )
        }),
    }
}

pub(crate) fn parse_cursor(value: Option<String>, field: FieldName) -> Result<Option<Cursor>, Error> {
    match value {
        None => Ok(None),
        Some(raw) => Cursor::from_token(raw.clone())
            .map(Some)
            .map_err(|err| field_error(field, err.to_string(), ErrorCode::InvalidCursor, Some(raw))),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = missing_field_error(FieldName::new("quantity"));
        assert_eq!(err.message, "missing required field: quantity");
        assert_eq!(err.details.as_ref().and_then(|d| d["field"].as_str()), Some("quantity"));
    }

    #[test]
    fn bad_identifier_keeps_the_storefront_message() {
        let err = parse_id("not-a-uuid", FieldName::new("id")).expect_err("bad id");
        assert_eq!(err.message, "Invalid id 'not-a-uuid' provided.");
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn non_positive_quantities_fail(#[case] value: i64) {
        let err = parse_quantity(value, FieldName::new("quantity")).expect_err("bad quantity");
        assert_eq!(
            err.details.as_ref().and_then(|d| d["code"].as_str()),
            Some("invalid_quantity")
        );
    }

    #[test]
    fn unknown_status_fails() {
        let err = parse_status("returned", FieldName::new("status")).expect_err("bad status");
        assert_eq!(
            err.details.as_ref().and_then(|d| d["code"].as_str()),
            Some("invalid_status")
        );
    }

    #[test]
    fn absent_page_size_defaults() {
        let size = parse_page_size(None, FieldName::new("pageSize")).expect("default");
        assert_eq!(size, PageSize::default());
    }

    #[test]
    fn zero_page_size_fails() {
        let err = parse_page_size(Some(0), FieldName::new("pageSize")).expect_err("zero");
        assert_eq!(
            err.details.as_ref().and_then(|d| d["code"].as_str()),
            Some("invalid_page_size")
        );
    }

    #[test]
    fn blank_cursor_fails() {
        let err = parse_cursor(Some("  ".into()), FieldName::new("after")).expect_err("blank");
        assert_eq!(
            err.details.as_ref().and_then(|d| d["code"].as_str()),
            Some("invalid_cursor")
        );
    }
}
