//! Async client for the FastPix video API.
//!
//! # Overview
//! [`FastPix`] exposes one endpoint group per resource family (media,
//! uploads, playback IDs, live streams, simulcast, playlists, signing keys,
//! DRM configurations, in-video AI and view analytics). Every call returns an
//! [`ApiResponse`] holding the status, headers, raw body and the decoded
//! envelope, or an [`Error`] whose [`kind`](Error::kind) tells configuration,
//! transport, decode and API failures apart.
//!
//! ```no_run
//! # async fn demo() -> fastpix_core::Result<()> {
//! use fastpix_core::{Credentials, FastPix, ListParams};
//!
//! let client = FastPix::new(Credentials::basic("access-token-id", "secret-key"))?;
//! let page = client.media().list(ListParams::new().limit(10)).await?;
//! println!("{} media", page.object.and_then(|e| e.data).unwrap_or_default().len());
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - Request building (`request`) and response parsing (`transport::parse_response`)
//!   are pure; only a [`Transport`] performs I/O. `FastPix::build` and
//!   `FastPix::parse` expose the two halves for callers that run the HTTP
//!   round-trip themselves.
//! - Credentials are resolved per request through a [`CredentialProvider`].
//! - Nothing retries. Cancellation and timeouts are opt-in per handle.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod enums;
pub mod error;
pub mod http;
pub mod request;
pub mod security;
pub mod transport;
pub mod types;

pub use client::{ClientBuilder, FastPix};
pub use config::ClientConfig;
pub use endpoints::uploads::put_payload;
pub use enums::WireEnum;
pub use error::{Error, ErrorBody, ErrorCode, ErrorKind, Result};
pub use http::{ApiResponse, HttpMethod, HttpRequest, HttpResponse};
pub use request::{Call, Operation, QueryStyle, Server};
pub use security::{credentials_fn, CredentialProvider, Credentials, EnvCredentials};
pub use tokio_util::sync::CancellationToken;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Envelope, ListParams, Metadata, Pagination};
