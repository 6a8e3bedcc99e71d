//! The `FastPix` client facade.
//!
//! # Design
//! `FastPix` is an `Arc` around the resolved configuration, the security
//! context and the transport, plus a small set of per-handle call options
//! (cancellation token and timeout). Cloning is cheap and clones share the
//! connection pool. `with_cancellation` and `with_timeout` return a new
//! handle instead of mutating, so one client can be shared across tasks while
//! each task applies its own limits.
//!
//! Every endpoint method funnels through `execute`: build the wire request,
//! race the transport against the cancellation token and timeout, then parse.
//! `build` and `parse` are also public for callers that want to perform the
//! HTTP round-trip themselves.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::{
    parse_base_url, ClientConfig, DEFAULT_LIVE_SERVER_URL, DEFAULT_SERVER_URL, USER_AGENT,
};
use crate::endpoints::{
    DrmConfigurationEndpoints, LiveStreamEndpoints, MediaAiEndpoints, MediaEndpoints,
    PlaybackEndpoints, PlaylistEndpoints, SigningKeyEndpoints, SimulcastEndpoints,
    UploadEndpoints, ViewEndpoints,
};
use crate::error::{Error, Result};
use crate::http::{ApiResponse, HttpRequest, HttpResponse};
use crate::request::{build_request, Call, Operation};
use crate::security::{
    credentials_fn, CredentialProvider, Credentials, EnvCredentials, SecurityContext,
};
use crate::transport::{parse_response, ReqwestTransport, Transport};

/// Client for the FastPix API.
#[derive(Clone)]
pub struct FastPix {
    inner: Arc<Inner>,
    options: CallOptions,
}

struct Inner {
    config: ClientConfig,
    security: SecurityContext,
    transport: Arc<dyn Transport>,
}

#[derive(Debug, Clone, Default)]
struct CallOptions {
    cancel: Option<CancellationToken>,
    timeout: Option<Duration>,
}

impl FastPix {
    /// Client for the default servers using fixed credentials.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder().security(credentials).build()
    }

    /// Client that reads `FASTPIX_USERNAME` / `FASTPIX_PASSWORD` on every
    /// request.
    pub fn from_env() -> Result<Self> {
        Self::builder().credential_provider(EnvCredentials).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// A handle whose calls fail with `Error::Cancelled` once `token` fires.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            options: CallOptions {
                cancel: Some(token),
                ..self.options.clone()
            },
        }
    }

    /// A handle whose calls fail with `Error::Timeout` after `timeout`.
    /// Overrides the client-wide timeout.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            options: CallOptions {
                timeout: Some(timeout),
                ..self.options.clone()
            },
        }
    }

    pub fn media(&self) -> MediaEndpoints<'_> {
        MediaEndpoints::new(self)
    }

    pub fn uploads(&self) -> UploadEndpoints<'_> {
        UploadEndpoints::new(self)
    }

    pub fn playback(&self) -> PlaybackEndpoints<'_> {
        PlaybackEndpoints::new(self)
    }

    pub fn live_streams(&self) -> LiveStreamEndpoints<'_> {
        LiveStreamEndpoints::new(self)
    }

    pub fn simulcast(&self) -> SimulcastEndpoints<'_> {
        SimulcastEndpoints::new(self)
    }

    pub fn playlists(&self) -> PlaylistEndpoints<'_> {
        PlaylistEndpoints::new(self)
    }

    pub fn signing_keys(&self) -> SigningKeyEndpoints<'_> {
        SigningKeyEndpoints::new(self)
    }

    pub fn drm_configurations(&self) -> DrmConfigurationEndpoints<'_> {
        DrmConfigurationEndpoints::new(self)
    }

    pub fn media_ai(&self) -> MediaAiEndpoints<'_> {
        MediaAiEndpoints::new(self)
    }

    pub fn views(&self) -> ViewEndpoints<'_> {
        ViewEndpoints::new(self)
    }

    /// Build the wire request for `operation` without sending it.
    pub fn build(&self, operation: &Operation, call: Call) -> Result<HttpRequest> {
        build_request(operation, call, &self.inner.security, &self.inner.config)
    }

    /// Interpret a response obtained by sending a request from [`build`](Self::build).
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<ApiResponse<T>> {
        parse_response(response)
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        call: Call,
    ) -> Result<ApiResponse<T>> {
        let request = self.build(operation, call)?;
        let span = tracing::debug_span!(
            "fastpix_request",
            operation = operation.name,
            method = %operation.method
        );

        async move {
            let started = Instant::now();
            let response = match self.dispatch(request).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "request failed"
                    );
                    return Err(err);
                }
            };
            tracing::debug!(
                status = response.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "response received"
            );
            parse_response(response)
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        let send = self.inner.transport.send(request);
        let timeout = self.options.timeout.or(self.inner.config.timeout);
        let limited = async move {
            match timeout {
                Some(limit) => match tokio::time::timeout(limit, send).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::Timeout),
                },
                None => send.await,
            }
        };

        match &self.options.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(Error::Cancelled),
                    result = limited => result,
                }
            }
            None => limited.await,
        }
    }
}

impl fmt::Debug for FastPix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastPix")
            .field("config", &self.inner.config)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Configures a [`FastPix`] client.
#[derive(Default)]
pub struct ClientBuilder {
    security: Option<SecurityContext>,
    server_url: Option<String>,
    live_server_url: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Fixed credentials.
    pub fn security(self, credentials: Credentials) -> Self {
        self.credential_provider(credentials)
    }

    /// Credentials produced by `supplier` each time a request is built.
    pub fn security_source<F>(self, supplier: F) -> Self
    where
        F: Fn() -> Credentials + Send + Sync + 'static,
    {
        self.credential_provider(credentials_fn(supplier))
    }

    pub fn credential_provider(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.security = Some(SecurityContext::new(provider));
        self
    }

    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn live_server_url(mut self, url: impl Into<String>) -> Self {
        self.live_server_url = Some(url.into());
        self
    }

    /// Replace the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Limit every call made through the client. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send requests through `transport` instead of a fresh `ReqwestTransport`.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<FastPix> {
        let security = self
            .security
            .ok_or(Error::MissingCredentials("no security source configured"))?;
        let config = ClientConfig {
            server_url: parse_base_url(self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL))?,
            live_server_url: parse_base_url(
                self.live_server_url
                    .as_deref()
                    .unwrap_or(DEFAULT_LIVE_SERVER_URL),
            )?,
            user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
            timeout: self.timeout,
        };
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        tracing::debug!(
            server_url = %config.server_url,
            live_server_url = %config.live_server_url,
            "fastpix client configured"
        );
        Ok(FastPix {
            inner: Arc::new(Inner {
                config,
                security,
                transport,
            }),
            options: CallOptions::default(),
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("server_url", &self.server_url)
            .field("live_server_url", &self.live_server_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::enums::ModerationType;
    use crate::error::{ErrorCode, ErrorKind};
    use crate::http::HttpMethod;
    use crate::types::views::ViewsQuery;
    use crate::types::ListParams;

    /// Records every request and replays queued responses (200 `{}` when the
    /// queue is empty).
    #[derive(Clone, Default)]
    struct Recording {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
        responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    }

    impl Recording {
        fn reply(&self, status: u16, body: &'static str) {
            self.responses.lock().unwrap().push_back(HttpResponse {
                status,
                headers: Vec::new(),
                body: Bytes::from_static(body.as_bytes()),
            });
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn last(&self) -> HttpRequest {
            self.requests().pop().expect("no request was sent")
        }
    }

    #[async_trait]
    impl Transport for Recording {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            let queued = self.responses.lock().unwrap().pop_front();
            Ok(queued.unwrap_or(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: Bytes::from_static(br#"{"success":true}"#),
            }))
        }
    }

    /// Never answers.
    struct Stalled;

    #[async_trait]
    impl Transport for Stalled {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
            std::future::pending().await
        }
    }

    fn client(transport: &Recording) -> FastPix {
        FastPix::builder()
            .security(Credentials::basic("u", "p"))
            .transport(transport.clone())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn list_media_sends_paging_query_and_basic_auth() {
        let transport = Recording::default();
        transport.reply(
            200,
            r#"{"success":true,"data":[],"pagination":{"totalRecords":0,"currentOffset":1,"offsetCount":1}}"#,
        );

        let response = client(&transport)
            .media()
            .list(ListParams::new().limit(1).offset(1))
            .await
            .unwrap();

        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://api.fastpix.io/v1/on-demand?limit=1&offset=1"
        );
        assert_eq!(request.header("Authorization"), Some("Basic dTpw"));
        assert_eq!(request.header("content-type"), None);
        let envelope = response.object.unwrap();
        assert!(envelope.data.unwrap().is_empty());
        assert_eq!(envelope.pagination.unwrap().total_records, Some(0));
    }

    #[tokio::test]
    async fn lazy_credentials_are_read_per_request() {
        let transport = Recording::default();
        let current = Arc::new(Mutex::new(Credentials::basic("first", "p")));
        let source = Arc::clone(&current);
        let client = FastPix::builder()
            .security_source(move || source.lock().unwrap().clone())
            .transport(transport.clone())
            .build()
            .unwrap();

        client.media().get("m1").await.unwrap();
        *current.lock().unwrap() = Credentials::basic("second", "p");
        client.media().get("m1").await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_ne!(
            sent[0].header("authorization"),
            sent[1].header("authorization")
        );
    }

    #[tokio::test]
    async fn not_found_envelope_surfaces_as_api_error() {
        let transport = Recording::default();
        transport.reply(
            404,
            r#"{"success":false,"error":{"code":"not_found","message":"Media not found"}}"#,
        );

        let err = client(&transport).media().get("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(404));
        let body = err.api_error().unwrap();
        assert_eq!(body.code, Some(ErrorCode::Text("not_found".to_string())));
        assert_eq!(body.message.as_deref(), Some("Media not found"));
    }

    #[tokio::test]
    async fn no_content_delete_has_no_object() {
        let transport = Recording::default();
        transport.reply(204, "");

        let response = client(&transport).media().delete("m1").await.unwrap();
        assert_eq!(response.status, 204);
        assert!(response.object.is_none());
        assert_eq!(transport.last().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn missing_path_parameter_never_reaches_the_transport() {
        let transport = Recording::default();
        let err = client(&transport).media().get("").await.unwrap_err();
        assert!(matches!(err, Error::MissingPathParameter { .. }), "{err:?}");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn live_operations_use_the_live_server() {
        let transport = Recording::default();
        client(&transport).live_streams().enable("s1").await.unwrap();

        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(
            request.url,
            "https://api.fastpix.io/v1/live/streams/s1/live-enable"
        );
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn overridden_servers_are_used() {
        let transport = Recording::default();
        let client = FastPix::builder()
            .security(Credentials::bearer("tok"))
            .server_url("http://localhost:8080/v1/")
            .live_server_url("http://localhost:8080/v1/live")
            .transport(transport.clone())
            .build()
            .unwrap();

        client.signing_keys().get("k1").await.unwrap();
        client.simulcast().get("s1", "sim1").await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://localhost:8080/v1/iam/signing-keys/k1");
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
        assert_eq!(
            sent[1].url,
            "http://localhost:8080/v1/live/streams/s1/simulcast/sim1"
        );
    }

    #[tokio::test]
    async fn playlist_media_removal_sends_a_body_with_delete() {
        let transport = Recording::default();
        client(&transport)
            .playlists()
            .remove_media("pl1", ["m1", "m2"])
            .await
            .unwrap();

        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Delete);
        assert!(request.url.ends_with("/on-demand/playlists/pl1/media"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"mediaIds":["m1","m2"]}"#));
    }

    #[tokio::test]
    async fn playback_id_delete_puts_id_in_query() {
        let transport = Recording::default();
        client(&transport)
            .playback()
            .delete_for_media("m1", "pb1")
            .await
            .unwrap();

        assert_eq!(
            transport.last().url,
            "https://api.fastpix.io/v1/on-demand/m1/playback-ids?playbackId=pb1"
        );
    }

    #[tokio::test]
    async fn empty_playback_id_is_never_sent() {
        let transport = Recording::default();
        let client = client(&transport);

        let err = client
            .playback()
            .delete_for_media("m1", "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingQueryParameter { .. }), "{err:?}");
        let err = client
            .playback()
            .delete_for_stream("s1", "")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn view_filters_are_exploded() {
        let transport = Recording::default();
        let query = ViewsQuery::new()
            .timespan("7:days")
            .filter("browser_name:Chrome")
            .filter("country:IN")
            .limit(5);
        client(&transport).views().list(&query).await.unwrap();

        assert_eq!(
            transport.last().url,
            "https://api.fastpix.io/v1/data/viewlist?timespan%5B%5D=7%3Adays&filterby%5B%5D=browser_name%3AChrome&filterby%5B%5D=country%3AIN&limit=5"
        );
    }

    #[tokio::test]
    async fn moderation_patch_body() {
        let transport = Recording::default();
        transport.reply(200, r#"{"success":true,"data":{"mediaId":"m1","moderation":{"type":"av"}}}"#);

        let response = client(&transport)
            .media_ai()
            .moderation("m1", ModerationType::AudioVideo)
            .await
            .unwrap();

        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Patch);
        assert!(request.url.ends_with("/on-demand/m1/moderation"));
        assert_eq!(request.body.as_deref(), Some(r#"{"moderation":{"type":"av"}}"#));
        let update = response.object.unwrap().data.unwrap();
        assert_eq!(update.media_id.as_deref(), Some("m1"));
    }

    #[tokio::test]
    async fn cancelled_token_fails_the_call() {
        let token = CancellationToken::new();
        let client = FastPix::builder()
            .security(Credentials::basic("u", "p"))
            .transport(Stalled)
            .build()
            .unwrap()
            .with_cancellation(token.clone());

        token.cancel();
        let err = client.media().get("m1").await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn per_call_timeout_fails_with_timeout() {
        let client = FastPix::builder()
            .security(Credentials::basic("u", "p"))
            .transport(Stalled)
            .build()
            .unwrap()
            .with_timeout(Duration::from_millis(20));

        let err = client.drm_configurations().get("d1").await.unwrap_err();
        assert!(matches!(err, Error::Timeout));
    }

    #[tokio::test]
    async fn token_fired_mid_flight_fails_the_call() {
        let token = CancellationToken::new();
        let client = FastPix::builder()
            .security(Credentials::basic("u", "p"))
            .transport(Stalled)
            .build()
            .unwrap()
            .with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });
        let err = client.media().get("m1").await.unwrap_err();
        canceller.await.unwrap();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn client_wide_timeout_applies_to_every_handle() {
        let client = FastPix::builder()
            .security(Credentials::basic("u", "p"))
            .transport(Stalled)
            .timeout(Duration::from_millis(20))
            .build()
            .unwrap();
        assert_eq!(client.config().timeout, Some(Duration::from_millis(20)));

        let err = client.signing_keys().list(ListParams::new()).await.unwrap_err();
        assert!(matches!(err, Error::Timeout));
        let cancellable = client.with_cancellation(CancellationToken::new());
        let err = cancellable.media().get("m1").await.unwrap_err();
        assert!(matches!(err, Error::Timeout));
    }

    #[test]
    fn builder_requires_a_security_source() {
        let err = FastPix::builder().transport(Stalled).build().unwrap_err();
        assert!(matches!(err, Error::MissingCredentials(_)));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn builder_rejects_bad_server_url() {
        let err = FastPix::builder()
            .security(Credentials::basic("u", "p"))
            .server_url("::not a url::")
            .transport(Stalled)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));

        let err = FastPix::builder()
            .security(Credentials::basic("u", "p"))
            .server_url("http://localhost:3000/v1?token=x")
            .transport(Stalled)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedBaseUrl { .. }), "{err:?}");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn host_does_io_round_trip() {
        let client = FastPix::builder()
            .security(Credentials::basic("u", "p"))
            .transport(Stalled)
            .build()
            .unwrap();

        let request = client
            .build(
                &crate::endpoints::media::GET_MEDIA,
                Call::new().path("mediaId", "m 1"),
            )
            .unwrap();
        assert_eq!(request.url, "https://api.fastpix.io/v1/on-demand/m%201");

        let parsed: ApiResponse<crate::types::Envelope<crate::types::media::Media>> = client
            .parse(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: Bytes::from_static(br#"{"success":true,"data":{"id":"m 1","status":"ready"}}"#),
            })
            .unwrap();
        assert_eq!(parsed.object.unwrap().data.unwrap().id, "m 1");
    }
}
