//! Typed requests and the request builder.
//!
//! # Design
//! Each remote operation is a static `Operation`: method, base server and a
//! path template such as `/on-demand/{mediaId}`. A `Call` carries the
//! per-invocation values (path parameters, query parameters and JSON body).
//! `build_request` combines the two with the credentials and configuration
//! into an `HttpRequest`. Building is pure: it never touches the network, and
//! every configuration problem surfaces here, before any I/O.

use std::fmt::Display;

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest};
use crate::security::SecurityContext;

/// Which base URL an operation is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Server {
    Api,
    Live,
}

/// Static description of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: HttpMethod,
    pub server: Server,
    pub path: &'static str,
}

impl Operation {
    pub const fn new(
        name: &'static str,
        method: HttpMethod,
        server: Server,
        path: &'static str,
    ) -> Self {
        Self {
            name,
            method,
            server,
            path,
        }
    }

    /// Placeholder names in the path template, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter_map(placeholder)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Serialization style of a multi-valued query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStyle {
    /// `explode: true` repeats the parameter (`a=1&a=2`); otherwise the
    /// values are comma-joined into one parameter (`a=1,2`).
    Form { explode: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryValue {
    Single(String),
    Required(String),
    List { values: Vec<String>, style: QueryStyle },
}

/// Per-call request values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Call {
    path_params: Vec<(&'static str, String)>,
    query: Vec<(&'static str, QueryValue)>,
    body: Option<String>,
}

impl Call {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Add a query parameter. `None` leaves it out of the URL entirely.
    pub fn query<V: Display>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query.push((name, QueryValue::Single(value.to_string())));
        }
        self
    }

    /// Add a query parameter the operation cannot run without. An empty value
    /// fails the build like a missing path parameter.
    pub fn required_query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, QueryValue::Required(value.into())));
        self
    }

    /// Add a multi-valued query parameter. An empty list is left out.
    pub fn query_list<I, V>(mut self, name: &'static str, values: I, style: QueryStyle) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if !values.is_empty() {
            self.query.push((name, QueryValue::List { values, style }));
        }
        self
    }

    /// Serialize `body` as the JSON request payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_string(body).map_err(Error::Serialization)?);
        Ok(self)
    }

    fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Turn an operation and its call values into a wire request.
pub fn build_request(
    operation: &Operation,
    call: Call,
    security: &SecurityContext,
    config: &ClientConfig,
) -> Result<HttpRequest> {
    for (i, (name, _)) in call.path_params.iter().enumerate() {
        if !operation.placeholders().any(|p| p == *name) {
            return Err(Error::UnexpectedPathParameter {
                operation: operation.name,
                name: name.to_string(),
            });
        }
        if call.path_params[..i].iter().any(|(seen, _)| seen == name) {
            return Err(Error::DuplicatePathParameter {
                operation: operation.name,
                name: name.to_string(),
            });
        }
    }
    for (name, value) in &call.query {
        if matches!(value, QueryValue::Required(v) if v.is_empty()) {
            return Err(Error::MissingQueryParameter {
                operation: operation.name,
                name: name.to_string(),
            });
        }
    }

    let mut url = config.base_url(operation.server).clone();
    {
        let mut segments = url.path_segments_mut().map_err(|()| Error::InvalidUrl {
            url: config.base_url(operation.server).to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        })?;
        segments.pop_if_empty();
        for segment in operation.path.trim_start_matches('/').split('/') {
            match placeholder(segment) {
                Some(name) => {
                    let value =
                        call.path_param(name)
                            .ok_or_else(|| Error::MissingPathParameter {
                                operation: operation.name,
                                name: name.to_string(),
                            })?;
                    segments.push(value);
                }
                None => {
                    segments.push(segment);
                }
            }
        }
    }

    if !call.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &call.query {
            match value {
                QueryValue::Single(value) | QueryValue::Required(value) => {
                    pairs.append_pair(name, value);
                }
                QueryValue::List {
                    values,
                    style: QueryStyle::Form { explode: true },
                } => {
                    for value in values {
                        pairs.append_pair(name, value);
                    }
                }
                QueryValue::List {
                    values,
                    style: QueryStyle::Form { explode: false },
                } => {
                    pairs.append_pair(name, &values.join(","));
                }
            }
        }
    }

    let mut headers = vec![
        (
            "authorization".to_string(),
            security.authorization_header_value()?,
        ),
        ("user-agent".to_string(), config.user_agent.clone()),
        ("accept".to_string(), "application/json".to_string()),
    ];
    if call.body.is_some() {
        headers.push(("content-type".to_string(), "application/json".to_string()));
    }

    Ok(HttpRequest {
        method: operation.method,
        url: url.into(),
        headers,
        body: call.body,
    })
}
