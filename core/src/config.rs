//! Resolved client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::request::Server;

/// Base URL for media, upload, playlist, key, DRM and analytics operations.
pub const DEFAULT_SERVER_URL: &str = "https://api.fastpix.io/v1";
/// Base URL for live-streaming operations.
pub const DEFAULT_LIVE_SERVER_URL: &str = "https://api.fastpix.io/v1/live";
/// `User-Agent` sent with every API request.
pub const USER_AGENT: &str = concat!("fastpix-rust/", env!("CARGO_PKG_VERSION"));

/// Immutable settings shared by every call made through one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: Url,
    pub live_server_url: Url,
    pub user_agent: String,
    /// Applied to every call unless overridden; `None` means no limit.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(server_url: &str, live_server_url: &str) -> Result<Self> {
        Ok(Self {
            server_url: parse_base_url(server_url)?,
            live_server_url: parse_base_url(live_server_url)?,
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        })
    }

    pub fn base_url(&self, server: Server) -> &Url {
        match server {
            Server::Api => &self.server_url,
            Server::Live => &self.live_server_url,
        }
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|source| Error::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }
    let part = if url.query().is_some() {
        Some("query string")
    } else if url.fragment().is_some() {
        Some("fragment")
    } else {
        None
    };
    if let Some(part) = part {
        return Err(Error::UnsupportedBaseUrl {
            url: raw.to_string(),
            part,
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let config = ClientConfig::new(DEFAULT_SERVER_URL, DEFAULT_LIVE_SERVER_URL).unwrap();
        assert_eq!(config.base_url(Server::Api).as_str(), "https://api.fastpix.io/v1");
        assert_eq!(
            config.base_url(Server::Live).as_str(),
            "https://api.fastpix.io/v1/live"
        );
        assert!(config.user_agent.starts_with("fastpix-rust/"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(matches!(
            ClientConfig::new("not a url", DEFAULT_LIVE_SERVER_URL),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new(DEFAULT_SERVER_URL, "mailto:ops@example.com"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn rejects_base_urls_with_query_or_fragment() {
        match ClientConfig::new("http://localhost:3000/v1?token=x", DEFAULT_LIVE_SERVER_URL) {
            Err(Error::UnsupportedBaseUrl { part, .. }) => assert_eq!(part, "query string"),
            other => panic!("unexpected result: {other:?}"),
        }
        match ClientConfig::new(DEFAULT_SERVER_URL, "http://localhost:3000/v1/live#top") {
            Err(Error::UnsupportedBaseUrl { part, .. }) => assert_eq!(part, "fragment"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
