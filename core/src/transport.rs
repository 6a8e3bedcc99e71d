//! Sending wire requests and interpreting wire responses.
//!
//! # Design
//! `Transport` is the only piece that performs I/O. It is an object-safe
//! async trait so the client can hold any implementation behind an `Arc`,
//! and tests can substitute one that records requests and replays canned
//! responses. `parse_response` is pure and shared by every transport.
//!
//! Nothing here retries. A failed send is reported once and the caller
//! decides what to do with it.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{decode_error_body, Error, Result};
use crate::http::{ApiResponse, HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `Transport` backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(Error::Transport)?;
        Ok(Self { client })
    }

    /// Reuse an existing client (and its connection pool and settings).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport(err)
    }
}

pub(crate) fn collect_headers(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Interpret a wire response against the success schema `T`.
///
/// - 2xx with an empty body yields `object: None`.
/// - 2xx with a body that does not decode as `T` is `Error::Decode`.
/// - Non-2xx with an error envelope is `Error::Api`; anything else is
///   `Error::UnexpectedStatus` carrying the raw body.
pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>> {
    let HttpResponse {
        status,
        headers,
        body,
    } = response;

    if !(200..300).contains(&status) {
        return Err(match decode_error_body(&body) {
            Some(error) => Error::Api {
                status,
                headers,
                error,
            },
            None => Error::UnexpectedStatus {
                status,
                headers,
                body: String::from_utf8_lossy(&body).into_owned(),
            },
        });
    }

    if status == 204 || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse {
            status,
            headers,
            raw_body: body,
            object: None,
        });
    }

    match serde_json::from_slice::<T>(&body) {
        Ok(object) => Ok(ApiResponse {
            status,
            headers,
            raw_body: body,
            object: Some(object),
        }),
        Err(source) => Err(Error::Decode {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            source,
        }),
    }
}
