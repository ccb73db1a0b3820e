//! Domain-level error payload.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! status codes and JSON envelopes; the domain only records the failure
//! category, a user-readable message, and optional structured details.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::trace_id::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or a required field is missing or mistyped.
    InvalidRequest,
    /// The requested order status change violates the state machine.
    InvalidTransition,
    /// Payment information was supplied outside the cart stage.
    PaymentNotAllowed,
    /// The referenced entity does not exist.
    NotFound,
    /// A uniqueness constraint was violated.
    Conflict,
    /// The backing store could not be reached.
    ServiceUnavailable,
    /// An unclassified store or server failure.
    InternalError,
}

/// Error payload surfaced to callers.
///
/// # Examples
/// ```
/// use shopfront::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("No order with id '123' exists.");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable error message. Store failures keep the underlying
    /// message verbatim for diagnosability.
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary structured details, e.g. the rejected `(from, to)`
    /// transition pair or the offending field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the ambient trace identifier when one
    /// is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use shopfront::domain::Error;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "quantity" }));
    /// assert!(err.details.is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidTransition`].
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTransition, message)
    }

    /// Convenience constructor for [`ErrorCode::PaymentNotAllowed`].
    pub fn payment_not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PaymentNotAllowed, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use serde_json::json;

    use super::*;

    #[test]
    fn constructors_set_expected_codes() {
        assert_eq!(Error::invalid_request("m").code, ErrorCode::InvalidRequest);
        assert_eq!(
            Error::invalid_transition("m").code,
            ErrorCode::InvalidTransition
        );
        assert_eq!(
            Error::payment_not_allowed("m").code,
            ErrorCode::PaymentNotAllowed
        );
        assert_eq!(Error::not_found("m").code, ErrorCode::NotFound);
        assert_eq!(Error::conflict("m").code, ErrorCode::Conflict);
        assert_eq!(
            Error::service_unavailable("m").code,
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(Error::internal("m").code, ErrorCode::InternalError);
    }

    #[test]
    fn codes_serialise_as_snake_case() {
        let json = serde_json::to_value(ErrorCode::PaymentNotAllowed).expect("serialise");
        assert_eq!(json, json!("payment_not_allowed"));
    }

    #[test]
    fn details_round_trip_through_serde() {
        let err = Error::invalid_request("bad").with_details(json!({ "field": "quantity" }));
        let value = serde_json::to_value(&err).expect("serialise");
        let back: Error = serde_json::from_value(value).expect("deserialise");
        assert_eq!(back, err);
    }

    #[test]
    fn absent_trace_id_is_elided() {
        let err = Error::not_found("missing");
        let value = serde_json::to_value(&err).expect("serialise");
        assert!(value.get("traceId").is_none());
    }
}
