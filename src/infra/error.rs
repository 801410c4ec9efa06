use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("http client initialization failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl InfraError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
