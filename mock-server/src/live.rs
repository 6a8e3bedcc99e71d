//! `/v1/live/streams`: streams, their playback IDs and simulcast targets.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::on_demand::{PlaybackId, PlaybackIdQuery};
use crate::{acknowledge, check_access_policy, new_id, page, reply, ApiError, Db, Paging, Reply};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub stream_id: String,
    pub stream_key: String,
    pub srt_secret: String,
    pub status: String,
    pub max_resolution: String,
    pub reconnect_window: u32,
    pub media_policy: String,
    pub enable_dvr_mode: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub playback_ids: Vec<PlaybackId>,
    #[serde(default, skip_serializing)]
    pub simulcasts: Vec<Simulcast>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulcast {
    pub simulcast_id: String,
    pub url: String,
    pub stream_key: String,
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStream {
    #[serde(default)]
    pub playback_settings: PlaybackSettings,
    #[serde(default)]
    pub input_media_settings: InputMediaSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSettings {
    pub access_policy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMediaSettings {
    pub max_resolution: Option<String>,
    pub reconnect_window: Option<u32>,
    pub media_policy: Option<String>,
    pub enable_dvr_mode: Option<bool>,
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStream {
    pub metadata: Option<BTreeMap<String, String>>,
    pub reconnect_window: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSimulcast {
    pub url: String,
    pub stream_key: String,
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSimulcast {
    pub is_enabled: Option<bool>,
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaybackId {
    pub access_policy: Option<String>,
}

const MAX_RECONNECT_WINDOW: u32 = 1800;

pub async fn list_streams(State(db): State<Db>, Query(paging): Query<Paging>) -> Reply {
    page(&db.read().await.streams, paging)
}

pub async fn create_stream(State(db): State<Db>, Json(input): Json<CreateStream>) -> Reply {
    let access_policy = input
        .playback_settings
        .access_policy
        .unwrap_or_else(|| "public".to_string());
    check_access_policy(&access_policy)?;
    let settings = input.input_media_settings;
    let reconnect_window = settings.reconnect_window.unwrap_or(60);
    if reconnect_window > MAX_RECONNECT_WINDOW {
        return Err(ApiError::bad_request(format!(
            "reconnectWindow must not exceed {MAX_RECONNECT_WINDOW}"
        )));
    }

    let stream = Stream {
        stream_id: new_id(),
        stream_key: uuid::Uuid::new_v4().simple().to_string(),
        srt_secret: uuid::Uuid::new_v4().simple().to_string(),
        status: "idle".to_string(),
        max_resolution: settings.max_resolution.unwrap_or_else(|| "1080p".to_string()),
        reconnect_window,
        media_policy: settings.media_policy.unwrap_or_else(|| "public".to_string()),
        enable_dvr_mode: settings.enable_dvr_mode.unwrap_or(false),
        metadata: settings.metadata.unwrap_or_default(),
        playback_ids: vec![PlaybackId {
            id: new_id(),
            access_policy,
        }],
        simulcasts: Vec::new(),
    };
    tracing::info!(stream_id = %stream.stream_id, "stream created");
    db.write().await.streams.push(stream.clone());
    reply(StatusCode::CREATED, &stream)
}

pub async fn get_stream(State(db): State<Db>, Path(stream_id): Path<String>) -> Reply {
    let store = db.read().await;
    let stream = store
        .streams
        .iter()
        .find(|s| s.stream_id == stream_id)
        .ok_or_else(|| ApiError::not_found("Stream", &stream_id))?;
    reply(StatusCode::OK, stream)
}

pub async fn update_stream(
    State(db): State<Db>,
    Path(stream_id): Path<String>,
    Json(input): Json<UpdateStream>,
) -> Reply {
    let mut store = db.write().await;
    let stream = find_stream(&mut store.streams, &stream_id)?;
    if let Some(window) = input.reconnect_window {
        if window > MAX_RECONNECT_WINDOW {
            return Err(ApiError::bad_request(format!(
                "reconnectWindow must not exceed {MAX_RECONNECT_WINDOW}"
            )));
        }
        stream.reconnect_window = window;
    }
    if let Some(metadata) = input.metadata {
        stream.metadata = metadata;
    }
    reply(StatusCode::OK, &*stream)
}

pub async fn delete_stream(State(db): State<Db>, Path(stream_id): Path<String>) -> Reply {
    let mut store = db.write().await;
    let before = store.streams.len();
    store.streams.retain(|s| s.stream_id != stream_id);
    if store.streams.len() == before {
        return Err(ApiError::not_found("Stream", &stream_id));
    }
    acknowledge()
}

pub async fn enable_stream(State(db): State<Db>, Path(stream_id): Path<String>) -> Reply {
    set_status(&db, &stream_id, "idle").await
}

pub async fn disable_stream(State(db): State<Db>, Path(stream_id): Path<String>) -> Reply {
    set_status(&db, &stream_id, "disabled").await
}

/// Finishing a disabled stream is rejected; otherwise the stream goes back
/// to idle.
pub async fn finish_stream(State(db): State<Db>, Path(stream_id): Path<String>) -> Reply {
    {
        let store = db.read().await;
        let stream = store
            .streams
            .iter()
            .find(|s| s.stream_id == stream_id)
            .ok_or_else(|| ApiError::not_found("Stream", &stream_id))?;
        if stream.status == "disabled" {
            return Err(ApiError::bad_request(format!(
                "stream {stream_id} is disabled"
            )));
        }
    }
    set_status(&db, &stream_id, "idle").await
}

async fn set_status(db: &Db, stream_id: &str, status: &str) -> Reply {
    let mut store = db.write().await;
    let stream = find_stream(&mut store.streams, stream_id)?;
    stream.status = status.to_string();
    tracing::info!(%stream_id, status, "stream status changed");
    acknowledge()
}

pub async fn create_playback_id(
    State(db): State<Db>,
    Path(stream_id): Path<String>,
    Json(input): Json<CreatePlaybackId>,
) -> Reply {
    let access_policy = input.access_policy.unwrap_or_else(|| "public".to_string());
    check_access_policy(&access_policy)?;
    let mut store = db.write().await;
    let stream = find_stream(&mut store.streams, &stream_id)?;
    let playback_id = PlaybackId {
        id: new_id(),
        access_policy,
    };
    stream.playback_ids.push(playback_id.clone());
    reply(StatusCode::CREATED, &playback_id)
}

pub async fn get_playback_id(
    State(db): State<Db>,
    Path((stream_id, playback_id)): Path<(String, String)>,
) -> Reply {
    let store = db.read().await;
    let stream = store
        .streams
        .iter()
        .find(|s| s.stream_id == stream_id)
        .ok_or_else(|| ApiError::not_found("Stream", &stream_id))?;
    let found = stream
        .playback_ids
        .iter()
        .find(|p| p.id == playback_id)
        .ok_or_else(|| ApiError::not_found("Playback ID", &playback_id))?;
    reply(StatusCode::OK, found)
}

pub async fn delete_playback_id(
    State(db): State<Db>,
    Path(stream_id): Path<String>,
    Query(query): Query<PlaybackIdQuery>,
) -> Reply {
    let mut store = db.write().await;
    let stream = find_stream(&mut store.streams, &stream_id)?;
    let before = stream.playback_ids.len();
    stream.playback_ids.retain(|p| p.id != query.playback_id);
    if stream.playback_ids.len() == before {
        return Err(ApiError::not_found("Playback ID", &query.playback_id));
    }
    acknowledge()
}

pub async fn create_simulcast(
    State(db): State<Db>,
    Path(stream_id): Path<String>,
    Json(input): Json<CreateSimulcast>,
) -> Reply {
    if !input.url.starts_with("rtmp://") && !input.url.starts_with("rtmps://") {
        return Err(ApiError::bad_request("url must be an rtmp:// or rtmps:// URL"));
    }
    let mut store = db.write().await;
    let stream = find_stream(&mut store.streams, &stream_id)?;
    let simulcast = Simulcast {
        simulcast_id: new_id(),
        url: input.url,
        stream_key: input.stream_key,
        is_enabled: true,
        metadata: input.metadata.unwrap_or_default(),
    };
    stream.simulcasts.push(simulcast.clone());
    reply(StatusCode::CREATED, &simulcast)
}

pub async fn get_simulcast(
    State(db): State<Db>,
    Path((stream_id, simulcast_id)): Path<(String, String)>,
) -> Reply {
    let mut store = db.write().await;
    let simulcast = find_simulcast(&mut store.streams, &stream_id, &simulcast_id)?;
    reply(StatusCode::OK, &*simulcast)
}

pub async fn update_simulcast(
    State(db): State<Db>,
    Path((stream_id, simulcast_id)): Path<(String, String)>,
    Json(input): Json<UpdateSimulcast>,
) -> Reply {
    let mut store = db.write().await;
    let simulcast = find_simulcast(&mut store.streams, &stream_id, &simulcast_id)?;
    if let Some(enabled) = input.is_enabled {
        simulcast.is_enabled = enabled;
    }
    if let Some(metadata) = input.metadata {
        simulcast.metadata = metadata;
    }
    reply(StatusCode::OK, &*simulcast)
}

pub async fn delete_simulcast(
    State(db): State<Db>,
    Path((stream_id, simulcast_id)): Path<(String, String)>,
) -> Reply {
    let mut store = db.write().await;
    let stream = find_stream(&mut store.streams, &stream_id)?;
    let before = stream.simulcasts.len();
    stream.simulcasts.retain(|s| s.simulcast_id != simulcast_id);
    if stream.simulcasts.len() == before {
        return Err(ApiError::not_found("Simulcast", &simulcast_id));
    }
    acknowledge()
}

fn find_stream<'a>(streams: &'a mut [Stream], stream_id: &str) -> Result<&'a mut Stream, ApiError> {
    streams
        .iter_mut()
        .find(|s| s.stream_id == stream_id)
        .ok_or_else(|| ApiError::not_found("Stream", stream_id))
}

fn find_simulcast<'a>(
    streams: &'a mut [Stream],
    stream_id: &str,
    simulcast_id: &str,
) -> Result<&'a mut Simulcast, ApiError> {
    find_stream(streams, stream_id)?
        .simulcasts
        .iter_mut()
        .find(|s| s.simulcast_id == simulcast_id)
        .ok_or_else(|| ApiError::not_found("Simulcast", simulcast_id))
}
