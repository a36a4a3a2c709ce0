//! Conversions from external infrastructure errors into domain errors.

use edulink_domain::EdulinkError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EdulinkError);

impl From<InfraError> for EdulinkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<EdulinkError> for InfraError {
    fn from(value: EdulinkError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        let domain = if err.is_timeout() {
            // The reason wording matters: callers distinguish timeouts from
            // other network failures through it.
            EdulinkError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            EdulinkError::Network(format!("failed to connect: {err}"))
        } else if err.is_builder() {
            EdulinkError::InvalidInput(format!("invalid request: {err}"))
        } else if err.is_decode() {
            EdulinkError::MalformedResponse(format!("undecodable response body: {err}"))
        } else {
            EdulinkError::Network(format!("http error: {err}"))
        };

        InfraError(domain)
    }
}
