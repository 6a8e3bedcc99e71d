//! Credentials and the `Authorization` header.
//!
//! # Design
//! The client never stores a header value. It holds a `CredentialProvider`
//! and asks it for the current credentials every time a request is built, so
//! a provider backed by the environment or a closure picks up rotated
//! credentials without rebuilding the client.

use std::fmt;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{Error, Result};

pub const USERNAME_ENV: &str = "FASTPIX_USERNAME";
pub const PASSWORD_ENV: &str = "FASTPIX_PASSWORD";

/// An access-token pair or a bearer token.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Bearer { token: String },
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer {
            token: token.into(),
        }
    }

    /// Read `FASTPIX_USERNAME` and `FASTPIX_PASSWORD` from the environment.
    pub fn from_env() -> Result<Self> {
        let username = std::env::var(USERNAME_ENV)
            .map_err(|_| Error::MissingCredentials("FASTPIX_USERNAME is not set"))?;
        let password = std::env::var(PASSWORD_ENV)
            .map_err(|_| Error::MissingCredentials("FASTPIX_PASSWORD is not set"))?;
        let credentials = Credentials::basic(username, password);
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<()> {
        match self {
            Credentials::Basic { username, .. } if username.trim().is_empty() => {
                Err(Error::MissingCredentials("username is empty"))
            }
            Credentials::Basic { password, .. } if password.trim().is_empty() => {
                Err(Error::MissingCredentials("password is empty"))
            }
            Credentials::Bearer { token } if token.trim().is_empty() => {
                Err(Error::MissingCredentials("bearer token is empty"))
            }
            _ => Ok(()),
        }
    }

    /// The value of the `Authorization` header for these credentials.
    pub fn header_value(&self) -> Result<String> {
        self.validate()?;
        Ok(match self {
            Credentials::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
            Credentials::Bearer { token } => format!("Bearer {token}"),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Resolves the credentials to use for the next outgoing request.
pub trait CredentialProvider: Send + Sync {
    fn resolve(&self) -> Result<Credentials>;
}

impl CredentialProvider for Credentials {
    fn resolve(&self) -> Result<Credentials> {
        Ok(self.clone())
    }
}

/// Reads credentials from the process environment on every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn resolve(&self) -> Result<Credentials> {
        Credentials::from_env()
    }
}

/// Provider backed by a closure; see [`credentials_fn`].
pub struct FnCredentials<F>(F);

impl<F> CredentialProvider for FnCredentials<F>
where
    F: Fn() -> Credentials + Send + Sync,
{
    fn resolve(&self) -> Result<Credentials> {
        Ok((self.0)())
    }
}

/// Wrap a zero-argument supplier as a [`CredentialProvider`]. The closure is
/// invoked once per request.
pub fn credentials_fn<F>(supplier: F) -> FnCredentials<F>
where
    F: Fn() -> Credentials + Send + Sync,
{
    FnCredentials(supplier)
}

/// Shared, immutable handle to a credential provider.
#[derive(Clone)]
pub struct SecurityContext {
    provider: Arc<dyn CredentialProvider>,
}

impl SecurityContext {
    pub fn new(provider: impl CredentialProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    pub fn from_provider(provider: Arc<dyn CredentialProvider>) -> Self {
        Self { provider }
    }

    /// Resolve the provider and render the header. Recomputed on every call.
    pub fn authorization_header_value(&self) -> Result<String> {
        self.provider.resolve()?.header_value()
    }
}

impl fmt::Debug for SecurityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityContext").finish_non_exhaustive()
    }
}
