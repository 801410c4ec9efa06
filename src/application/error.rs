use std::error::Error as StdError;

use medistore_api_types::{ErrorBody, codes};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;
use crate::infra::remote::{ClientError, RequestError};

/// Public message for failures whose details must not leak.
pub const GENERIC_FAILURE: &str = "Something Went Wrong";

type BoxError = Box<dyn StdError + Send + Sync>;

/// Everything that can stop a data-access call. Converted into the
/// envelope's [`ErrorBody`] at the service boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("transport failure: {source}")]
    Transport {
        #[source]
        source: BoxError,
    },
    #[error("remote API rejected the call ({status}): {message}")]
    Remote {
        status: u16,
        message: String,
        code: Option<String>,
    },
    #[error("remote API answered without a payload")]
    EmptyPayload { message: String },
}

impl ApiError {
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    /// Classify a client failure. `fallback` names the operation and is used
    /// when the server gives no message of its own.
    pub fn from_client(err: ClientError, fallback: &str) -> Self {
        match err {
            ClientError::Rejected { status, body } => Self::Remote {
                status: status.as_u16(),
                message: server_message(&body).unwrap_or_else(|| fallback.to_string()),
                code: server_code(&body).or_else(|| {
                    (!status.is_success()).then(|| format!("HTTP_{}", status.as_u16()))
                }),
            },
            other => Self::transport(other),
        }
    }

    pub fn into_body(self) -> ErrorBody {
        match self {
            Self::Domain(DomainError::Validation { message }) => {
                ErrorBody::with_code(message, codes::VALIDATION_ERROR)
            }
            Self::Domain(err @ DomainError::Unauthenticated) => {
                ErrorBody::with_code(err.to_string(), codes::UNAUTHENTICATED)
            }
            Self::Transport { source } => {
                error!(error = %source, "data-access call failed in transport");
                ErrorBody::with_code(GENERIC_FAILURE, codes::NETWORK_ERROR)
            }
            Self::EmptyPayload { message } => ErrorBody::new(message),
            Self::Remote { message, code, .. } => match code {
                Some(code) => ErrorBody::with_code(message, code),
                None => ErrorBody::new(message),
            },
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        Self::transport(err)
    }
}

impl From<ApiError> for ErrorBody {
    fn from(err: ApiError) -> Self {
        err.into_body()
    }
}

/// `message`, then a string `error`, then `error.message`.
fn server_message(body: &Value) -> Option<String> {
    let non_empty = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };
    non_empty(body.get("message"))
        .or_else(|| non_empty(body.get("error")))
        .or_else(|| non_empty(body.get("error").and_then(|error| error.get("message"))))
}

fn server_code(body: &Value) -> Option<String> {
    body.get("code")
        .or_else(|| body.get("error").and_then(|error| error.get("code")))
        .and_then(Value::as_str)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    fn rejected(status: u16, body: Value) -> ClientError {
        ClientError::Rejected {
            status: StatusCode::from_u16(status).expect("status"),
            body,
        }
    }

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::from_client(
            rejected(409, json!({"message": "Already reviewed", "error": "Conflict"})),
            "Failed to create review",
        );
        let body = err.into_body();
        assert_eq!(body.message, "Already reviewed");
        assert_eq!(body.code.as_deref(), Some("HTTP_409"));
    }

    #[test]
    fn string_error_field_is_second_choice() {
        let err = ApiError::from_client(
            rejected(400, json!({"error": "Out of stock", "code": "STOCK"})),
            "Failed to create order",
        );
        let body = err.into_body();
        assert_eq!(body.message, "Out of stock");
        assert_eq!(body.code.as_deref(), Some("STOCK"));
    }

    #[test]
    fn fallback_when_server_says_nothing() {
        let err = ApiError::from_client(rejected(500, Value::String("<html>".into())), "Failed");
        assert_eq!(err.into_body().message, "Failed");
    }

    #[test]
    fn success_status_failure_body_has_no_http_code() {
        let err = ApiError::from_client(
            rejected(200, json!({"success": false, "message": "nope"})),
            "Failed",
        );
        let body = err.into_body();
        assert_eq!(body.message, "nope");
        assert_eq!(body.code, None);
    }

    #[test]
    fn validation_maps_to_local_code() {
        let body = ApiError::from(DomainError::validation("Order status is required")).into_body();
        assert_eq!(body.message, "Order status is required");
        assert!(body.is_local());

        let body = ApiError::from(DomainError::Unauthenticated).into_body();
        assert_eq!(body.message, "You must be logged in");
        assert_eq!(body.code.as_deref(), Some(codes::UNAUTHENTICATED));
    }

    #[test]
    fn transport_hides_details() {
        let err = ApiError::transport(std::io::Error::other("connection reset by peer"));
        let body = err.into_body();
        assert_eq!(body.message, GENERIC_FAILURE);
        assert_eq!(body.code.as_deref(), Some(codes::NETWORK_ERROR));
    }
}
