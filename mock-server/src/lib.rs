//! In-memory stand-in for the FastPix REST API.
//!
//! Serves the on-demand, upload, playback ID, live stream, simulcast and
//! playlist routes under `/v1` and `/v1/live`, behind HTTP basic auth with
//! the fixed [`USERNAME`] / [`PASSWORD`] pair. Direct uploads hand out URLs
//! under `/storage/uploads/{uploadId}` on the same server; that route takes
//! the raw file bytes and needs no credentials.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

mod live;
mod on_demand;
mod playlists;

pub use live::{Simulcast, Stream};
pub use on_demand::{InputInfo, Media, PlaybackId, Upload};
pub use playlists::{Playlist, PlaylistMedia};

pub const USERNAME: &str = "mock-access-token";
pub const PASSWORD: &str = "mock-secret-key";

/// Everything the server knows. Records are kept in creation order.
#[derive(Debug, Default)]
pub struct Store {
    pub media: Vec<Media>,
    pub uploads: Vec<Upload>,
    pub streams: Vec<Stream>,
    pub playlists: Vec<Playlist>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));

    let api = Router::new()
        .route(
            "/v1/on-demand",
            get(on_demand::list_media).post(on_demand::create_media),
        )
        .route(
            "/v1/on-demand/{mediaId}",
            get(on_demand::get_media)
                .patch(on_demand::update_media)
                .delete(on_demand::delete_media),
        )
        .route(
            "/v1/on-demand/{mediaId}/input-info",
            get(on_demand::input_info),
        )
        .route(
            "/v1/on-demand/{mediaId}/playback-ids",
            post(on_demand::create_playback_id).delete(on_demand::delete_playback_id),
        )
        .route(
            "/v1/on-demand/{mediaId}/playback-ids/{playbackId}",
            get(on_demand::get_playback_id),
        )
        .route("/v1/on-demand/upload", post(on_demand::create_upload))
        .route("/v1/on-demand/uploads", get(on_demand::list_unused_uploads))
        .route(
            "/v1/on-demand/upload/{uploadId}/cancel",
            put(on_demand::cancel_upload),
        )
        .route(
            "/v1/on-demand/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route(
            "/v1/on-demand/playlists/{playlistId}",
            get(playlists::get_playlist)
                .put(playlists::update_playlist)
                .delete(playlists::delete_playlist),
        )
        .route(
            "/v1/on-demand/playlists/{playlistId}/media",
            patch(playlists::add_media)
                .put(playlists::reorder_media)
                .delete(playlists::remove_media),
        )
        .route(
            "/v1/live/streams",
            get(live::list_streams).post(live::create_stream),
        )
        .route(
            "/v1/live/streams/{streamId}",
            get(live::get_stream)
                .patch(live::update_stream)
                .delete(live::delete_stream),
        )
        .route(
            "/v1/live/streams/{streamId}/live-enable",
            put(live::enable_stream),
        )
        .route(
            "/v1/live/streams/{streamId}/live-disable",
            put(live::disable_stream),
        )
        .route("/v1/live/streams/{streamId}/finish", put(live::finish_stream))
        .route(
            "/v1/live/streams/{streamId}/playback-ids",
            post(live::create_playback_id).delete(live::delete_playback_id),
        )
        .route(
            "/v1/live/streams/{streamId}/playback-ids/{playbackId}",
            get(live::get_playback_id),
        )
        .route(
            "/v1/live/streams/{streamId}/simulcast",
            post(live::create_simulcast),
        )
        .route(
            "/v1/live/streams/{streamId}/simulcast/{simulcastId}",
            get(live::get_simulcast)
                .put(live::update_simulcast)
                .delete(live::delete_simulcast),
        )
        .route_layer(middleware::from_fn(require_basic_auth));

    Router::new()
        .merge(api)
        .route("/storage/uploads/{uploadId}", put(on_demand::receive_upload))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// The `Authorization` value the server accepts.
pub fn expected_authorization() -> String {
    format!("Basic {}", STANDARD.encode(format!("{USERNAME}:{PASSWORD}")))
}

async fn require_basic_auth(request: Request, next: Next) -> Response {
    let rejection = match request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        None => Some("Missing Authorization header"),
        Some(value) if value == expected_authorization() => None,
        Some(_) => Some("Invalid access token or secret key"),
    };
    match rejection {
        None => next.run(request).await,
        Some(description) => {
            tracing::info!(path = %request.uri().path(), description, "rejected request");
            ApiError::unauthorized(description).into_response()
        }
    }
}

/// Error reply in the FastPix envelope shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
    description: String,
}

impl ApiError {
    fn new(status: StatusCode, message: &'static str, description: impl Into<String>) -> Self {
        Self {
            status,
            message,
            description: description.into(),
        }
    }

    fn unauthorized(description: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", description)
    }

    fn not_found(what: &str, id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("{what} with id {id} not found"),
        )
    }

    fn bad_request(description: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", description)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": {
                "code": self.status.as_u16(),
                "message": self.message,
                "description": self.description,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

type Reply = Result<(StatusCode, Json<serde_json::Value>), ApiError>;

fn reply<T: Serialize>(status: StatusCode, data: &T) -> Reply {
    Ok((status, Json(json!({ "success": true, "data": data }))))
}

fn acknowledge() -> Reply {
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

/// `limit` / `offset` query; `offset` is a 1-based page number.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Paging {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

fn page<T: Serialize>(records: &[T], paging: Paging) -> Reply {
    let limit = paging.limit.unwrap_or(10).max(1);
    let offset = paging.offset.unwrap_or(1).max(1);
    let data: Vec<&T> = records
        .iter()
        .skip((offset - 1).saturating_mul(limit))
        .take(limit)
        .collect();
    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": data,
            "pagination": {
                "totalRecords": records.len(),
                "currentOffset": offset,
                "offsetCount": records.len().div_ceil(limit),
            }
        })),
    ))
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn check_access_policy(policy: &str) -> Result<(), ApiError> {
    match policy {
        "public" | "private" | "drm" => Ok(()),
        other => Err(ApiError::bad_request(format!(
            "accessPolicy must be one of public, private, drm; got {other}"
        ))),
    }
}
