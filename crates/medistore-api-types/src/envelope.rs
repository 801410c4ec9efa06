use serde::{Deserialize, Serialize};

/// Error codes carried by [`ErrorBody::code`].
pub mod codes {
    /// A required field was missing or invalid; no request was sent.
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// The operation needs a session and none was supplied; no request was sent.
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    /// The request could not be completed or its body could not be read.
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";

    /// Returns true for codes that mean the remote API was never contacted.
    pub fn is_local(code: &str) -> bool {
        code == VALIDATION_ERROR || code == UNAUTHENTICATED
    }
}

/// Error half of an [`Envelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// True when the failure happened before any request reached the remote API.
    pub fn is_local(&self) -> bool {
        self.code.as_deref().is_some_and(codes::is_local)
    }
}

/// Uniform `{ data, error }` result shape.
///
/// Constructed only through [`Envelope::ok`] and [`Envelope::err`], so exactly
/// one side is populated. Both keys are always serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    data: Option<T>,
    error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ErrorBody) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            data: self.data.map(f),
            error: self.error,
        }
    }

    pub fn into_result(self) -> Result<T, ErrorBody> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(ErrorBody::new("empty envelope")),
        }
    }
}

impl<T> From<Result<T, ErrorBody>> for Envelope<T> {
    fn from(result: Result<T, ErrorBody>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ok_envelope_serializes_null_error() {
        let envelope = Envelope::ok(json!({"id": "c1"}));
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(value, json!({"data": {"id": "c1"}, "error": null}));
    }

    #[test]
    fn err_envelope_omits_missing_code() {
        let envelope: Envelope<()> = Envelope::err(ErrorBody::new("Something Went Wrong"));
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value,
            json!({"data": null, "error": {"message": "Something Went Wrong"}})
        );
    }

    #[test]
    fn local_codes_are_recognised() {
        assert!(ErrorBody::with_code("x", codes::VALIDATION_ERROR).is_local());
        assert!(ErrorBody::with_code("x", codes::UNAUTHENTICATED).is_local());
        assert!(!ErrorBody::with_code("x", codes::NETWORK_ERROR).is_local());
        assert!(!ErrorBody::new("x").is_local());
    }

    #[test]
    fn into_result_prefers_data() {
        let envelope = Envelope::ok(5);
        assert_eq!(envelope.into_result(), Ok(5));

        let envelope: Envelope<i32> = Envelope::err(ErrorBody::new("nope"));
        assert_eq!(envelope.into_result().unwrap_err().message, "nope");
    }
}
