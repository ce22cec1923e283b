//! Client error types.

use serde::Deserialize;

/// Errors that can occur when using the Openpay client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Openpay returned an error response.
    #[error("API error: {category}/{error_code} (HTTP {http_code}) - {description}")]
    Api {
        /// Error category (`request`, `internal` or `gateway`).
        category: String,
        /// Openpay numeric error code.
        error_code: u32,
        /// Human readable description.
        description: String,
        /// HTTP status code.
        http_code: u16,
        /// Request identifier assigned by Openpay, if any.
        request_id: Option<String>,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A customer-scoped operation was invoked on a `Customer` that has no
    /// merchant attached.
    #[error("customer has no merchant reference; attach one before issuing requests")]
    MissingMerchant,

    /// The resource ID cannot address a single resource (empty, `.` or `..`).
    #[error("invalid resource ID: {0:?}")]
    InvalidId(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub fn http_code(&self) -> Option<u16> {
        match self {
            Self::Api { http_code, .. } => Some(*http_code),
            _ => None,
        }
    }
}

/// Error body returned by Openpay on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub category: String,
    pub error_code: u32,
    pub description: String,
    pub http_code: u16,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl From<ApiErrorResponse> for ClientError {
    fn from(body: ApiErrorResponse) -> Self {
        Self::Api {
            category: body.category,
            error_code: body.error_code,
            description: body.description,
            http_code: body.http_code,
            request_id: body.request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_body_maps_to_variant() {
        let body: ApiErrorResponse = serde_json::from_str(
            r#"{"category":"request","description":"The customer with id 'x' does not exist","http_code":404,"error_code":1005,"request_id":"req-1"}"#,
        )
        .unwrap();

        let err = ClientError::from(body);
        assert_eq!(err.http_code(), Some(404));
        match err {
            ClientError::Api {
                category,
                error_code,
                request_id,
                ..
            } => {
                assert_eq!(category, "request");
                assert_eq!(error_code, 1005);
                assert_eq!(request_id.as_deref(), Some("req-1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_merchant_has_no_status() {
        assert_eq!(ClientError::MissingMerchant.http_code(), None);
    }
}
