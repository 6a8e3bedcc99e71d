//! Error types for the FastPix client.
//!
//! # Design
//! Failures fall into four kinds that callers need to tell apart:
//! configuration problems detected before any network call, transport
//! failures where the server never answered, decode failures where the server
//! answered with something we could not parse, and API errors where the
//! server answered with a non-2xx status. `Error::kind` exposes that split so
//! retry decisions stay with the caller.
//!
//! Every variant produced after a response arrived keeps the raw status code
//! and headers, so low-level details are never lost behind the parsed path.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the FastPix client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No usable credentials were available when a request was built.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// A placeholder in the operation's path template had no value.
    #[error("missing path parameter `{name}` for {operation}")]
    MissingPathParameter {
        operation: &'static str,
        name: String,
    },

    /// A path parameter was supplied that the template does not reference.
    #[error("path parameter `{name}` is not used by {operation}")]
    UnexpectedPathParameter {
        operation: &'static str,
        name: String,
    },

    /// The same path parameter was supplied more than once.
    #[error("path parameter `{name}` given more than once for {operation}")]
    DuplicatePathParameter {
        operation: &'static str,
        name: String,
    },

    /// A required query parameter was empty.
    #[error("missing query parameter `{name}` for {operation}")]
    MissingQueryParameter {
        operation: &'static str,
        name: String,
    },

    /// A configured base URL or an upload URL is not a valid absolute URL.
    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A base URL parsed but carries a part that cannot prefix every request.
    #[error("base url `{url}` must not have a {part}")]
    UnsupportedBaseUrl { url: String, part: &'static str },

    /// A wire string did not match any variant of a declared enum.
    #[error("unknown value `{value}` for enum {enum_name}")]
    UnknownEnumValue {
        enum_name: &'static str,
        value: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The call did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The caller's cancellation token fired before the call completed.
    #[error("request cancelled")]
    Cancelled,

    /// A 2xx response body did not match the expected schema.
    #[error("failed to decode {status} response: {source}")]
    Decode {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server returned a non-2xx status with a well-formed error envelope.
    #[error("API error {status}: {error}")]
    Api {
        status: u16,
        headers: Vec<(String, String)>,
        error: ErrorBody,
    },

    /// The server returned a non-2xx status whose body is not an error envelope.
    #[error("HTTP {status}: {body}")]
    UnexpectedStatus {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Decode,
    Api,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingCredentials(_)
            | Error::MissingPathParameter { .. }
            | Error::UnexpectedPathParameter { .. }
            | Error::DuplicatePathParameter { .. }
            | Error::MissingQueryParameter { .. }
            | Error::InvalidUrl { .. }
            | Error::UnsupportedBaseUrl { .. }
            | Error::UnknownEnumValue { .. }
            | Error::Serialization(_) => ErrorKind::Configuration,
            Error::Transport(_) | Error::Timeout | Error::Cancelled => ErrorKind::Transport,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Api { .. } | Error::UnexpectedStatus { .. } => ErrorKind::Api,
        }
    }

    /// HTTP status of the response that caused this error, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Decode { status, .. }
            | Error::Api { status, .. }
            | Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Response headers, for errors raised after a response arrived.
    pub fn headers(&self) -> Option<&[(String, String)]> {
        match self {
            Error::Decode { headers, .. }
            | Error::Api { headers, .. }
            | Error::UnexpectedStatus { headers, .. } => Some(headers),
            _ => None,
        }
    }

    /// The structured error envelope, when the server sent one.
    pub fn api_error(&self) -> Option<&ErrorBody> {
        match self {
            Error::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Error code as sent by the server. FastPix uses numeric codes, but textual
/// ones are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(n) => write!(f, "{n}"),
            ErrorCode::Text(s) => f.write_str(s),
        }
    }
}

/// The `{code, message, description}` error schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ErrorBody {
    fn is_empty(&self) -> bool {
        self.code.is_none() && self.message.is_none() && self.description.is_none()
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "[{code}] ")?;
        }
        f.write_str(self.message.as_deref().unwrap_or("no message"))?;
        if let Some(description) = &self.description {
            write!(f, " ({description})")?;
        }
        Ok(())
    }
}

/// Error response as it appears on the wire. The server nests the error
/// under `error`; some endpoints return the fields at the top level.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
    #[serde(flatten)]
    flat: ErrorBody,
}

/// Decode a non-2xx body into an [`ErrorBody`], or `None` if it is not one.
pub(crate) fn decode_error_body(body: &[u8]) -> Option<ErrorBody> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;
    match envelope.error {
        Some(error) if !error.is_empty() => Some(error),
        _ if !envelope.flat.is_empty() => Some(envelope.flat),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_error_envelope_decodes() {
        let body = br#"{"success":false,"error":{"code":404,"message":"Media not found","description":"no media with that id"}}"#;
        let error = decode_error_body(body).unwrap();
        assert_eq!(error.code, Some(ErrorCode::Number(404)));
        assert_eq!(error.message.as_deref(), Some("Media not found"));
        assert_eq!(error.description.as_deref(), Some("no media with that id"));
    }

    #[test]
    fn flat_error_envelope_decodes() {
        let body = br#"{"code":"not_found","message":"Media not found"}"#;
        let error = decode_error_body(body).unwrap();
        assert_eq!(error.code, Some(ErrorCode::Text("not_found".to_string())));
        assert_eq!(error.message.as_deref(), Some("Media not found"));
        assert!(error.description.is_none());
    }

    #[test]
    fn non_envelope_bodies_are_rejected() {
        assert!(decode_error_body(b"internal error").is_none());
        assert!(decode_error_body(b"{}").is_none());
        assert!(decode_error_body(br#"{"success":false}"#).is_none());
        assert!(decode_error_body(b"").is_none());
    }

    #[test]
    fn error_body_display() {
        let error = ErrorBody {
            code: Some(ErrorCode::Number(401)),
            message: Some("Unauthorized".to_string()),
            description: None,
        };
        assert_eq!(error.to_string(), "[401] Unauthorized");
    }

    #[test]
    fn kinds_and_status() {
        let err = Error::UnexpectedStatus {
            status: 502,
            headers: Vec::new(),
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(502));
        assert!(err.api_error().is_none());

        assert_eq!(Error::Cancelled.kind(), ErrorKind::Transport);
        assert_eq!(Error::Cancelled.status(), None);
        assert_eq!(
            Error::MissingCredentials("username is empty").kind(),
            ErrorKind::Configuration
        );
    }
}
