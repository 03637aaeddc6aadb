use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Gehirn DNS operations.
///
/// Three families are distinguished:
///
/// - **Local preconditions** ([`MaybeRegistered`](Self::MaybeRegistered),
///   [`IdUnset`](Self::IdUnset)): raised before any request is built.
/// - **Provider errors** ([`Api`](Self::Api), [`HttpStatus`](Self::HttpStatus),
///   [`Unsuccessful`](Self::Unsuccessful)): the API answered, but not with success.
/// - **Transport and codec errors**: everything else.
///
/// No variant is retried by the client.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GehirnError {
    /// A create operation received a record that already carries an id.
    #[error(
        "This record may already be registered at Gehirn DNS. Use `update_resource` instead of this method"
    )]
    MaybeRegistered,

    /// An update or delete operation received a record without an id.
    #[error("Record id is unset")]
    IdUnset,

    /// The API answered with a non-200 status and a decodable error envelope.
    ///
    /// `Display` yields the provider message unchanged.
    #[error("{message}")]
    Api {
        /// Provider error code (usually mirrors the HTTP status).
        code: u32,
        /// Provider error message.
        message: String,
    },

    /// The API answered with a non-200 status and a body that is not an error envelope.
    ///
    /// `Display` yields the HTTP status line, e.g. `404 Not Found`. The reason phrase is the
    /// canonical one for the code, not the phrase the server sent; codes without a registered
    /// phrase render as `599 <unknown status code>`.
    #[error("{status}")]
    HttpStatus {
        /// Status code followed by its canonical reason phrase.
        status: String,
    },

    /// A zone listing came back with `is_success: false`.
    #[error("Zone listing reported an unsuccessful result")]
    Unsuccessful,

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("Network error: {detail}")]
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out under the caller's transport configuration.
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The configured endpoint is not a usable base URL.
    #[error("Invalid endpoint '{endpoint}': {detail}")]
    InvalidEndpoint {
        /// The rejected endpoint.
        endpoint: String,
        /// Why it was rejected.
        detail: String,
    },

    /// Failed to parse the API response.
    #[error("Parse error: {detail}")]
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("Serialization error: {detail}")]
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl GehirnError {
    /// Whether the error stems from caller input or a remote rejection, used for log levels.
    ///
    /// `true` is logged at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::MaybeRegistered
                | Self::IdUnset
                | Self::Api { .. }
                | Self::HttpStatus { .. }
                | Self::Unsuccessful
        )
    }

    /// Provider error code, if this error came from a decoded error envelope.
    pub fn api_code(&self) -> Option<u32> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn network(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout {
                detail: e.to_string(),
            }
        } else {
            Self::NetworkError {
                detail: e.to_string(),
            }
        }
    }
}

/// Convenience type alias for `Result<T, GehirnError>`.
pub type Result<T> = std::result::Result<T, GehirnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_api_error_is_raw_message() {
        let e = GehirnError::Api {
            code: 404,
            message: "not found".to_string(),
        };
        assert_eq!(e.to_string(), "not found");
        assert_eq!(e.api_code(), Some(404));
    }

    #[test]
    fn display_http_status_is_status_line() {
        let e = GehirnError::HttpStatus {
            status: "502 Bad Gateway".to_string(),
        };
        assert_eq!(e.to_string(), "502 Bad Gateway");
        assert_eq!(e.api_code(), None);
    }

    #[test]
    fn display_maybe_registered_points_to_update() {
        let e = GehirnError::MaybeRegistered;
        assert!(e.to_string().contains("update_resource"));
    }

    #[test]
    fn display_id_unset() {
        assert_eq!(GehirnError::IdUnset.to_string(), "Record id is unset");
    }

    #[test]
    fn display_invalid_endpoint() {
        let e = GehirnError::InvalidEndpoint {
            endpoint: "nope".to_string(),
            detail: "relative URL without a base".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid endpoint 'nope': relative URL without a base"
        );
    }

    #[test]
    fn expected_vs_unexpected() {
        assert!(GehirnError::IdUnset.is_expected());
        assert!(GehirnError::Unsuccessful.is_expected());
        assert!(
            GehirnError::Api {
                code: 400,
                message: "bad".into()
            }
            .is_expected()
        );
        assert!(
            !GehirnError::NetworkError {
                detail: "refused".into()
            }
            .is_expected()
        );
        assert!(
            !GehirnError::ParseError {
                detail: "eof".into()
            }
            .is_expected()
        );
    }

    #[test]
    fn serialize_json_tagged_by_kind() {
        let e = GehirnError::Api {
            code: 409,
            message: "conflict".to_string(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"kind\":\"Api\""));
        assert!(json.contains("\"code\":409"));

        let back: GehirnError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "conflict");
    }
}
