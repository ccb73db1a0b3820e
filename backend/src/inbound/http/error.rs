//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON responses and status codes.
//! Store failure messages are returned to callers verbatim; the trace
//! identifier in the payload and header is the hook for correlating them
//! with server logs.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::InvalidTransition | ErrorCode::PaymentNotAllowed => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.as_str()));
        }

        builder.json(self)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::body::to_bytes;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Error::invalid_request("m"), StatusCode::BAD_REQUEST)]
    #[case(Error::invalid_transition("m"), StatusCode::BAD_REQUEST)]
    #[case(Error::payment_not_allowed("m"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("m"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("m"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("m"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("m"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_statuses(#[case] error: Error, #[case] status: StatusCode) {
        assert_eq!(error.status_code(), status);
    }

    #[actix_rt::test]
    async fn response_preserves_the_message_verbatim() {
        let error = Error::internal("instance not found in collection 'orders'");
        let response = error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(
            payload["message"],
            "instance not found in collection 'orders'"
        );
        assert_eq!(payload["code"], "internal_error");
    }

    #[actix_rt::test]
    async fn response_carries_the_trace_header() {
        let error = Error::not_found("missing").with_trace_id("abc-123");
        let response = error.error_response();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace header present");
        assert_eq!(header, "abc-123");
    }
}
