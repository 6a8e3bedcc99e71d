//! `/v1/on-demand` media, playback IDs and direct uploads, plus the storage
//! route that receives upload bytes.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{acknowledge, check_access_policy, new_id, page, reply, ApiError, Db, Paging, Reply};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackId {
    pub id: String,
    pub access_policy: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub max_resolution: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub playback_ids: Vec<PlaybackId>,
    #[serde(default, skip_serializing)]
    pub inputs: Vec<InputInfo>,
}

impl Media {
    fn new(access_policy: &str, max_resolution: Option<String>, inputs: Vec<InputInfo>) -> Self {
        Self {
            id: new_id(),
            status: "ready".to_string(),
            title: None,
            max_resolution: max_resolution.unwrap_or_else(|| "1080p".to_string()),
            metadata: BTreeMap::new(),
            playback_ids: vec![PlaybackId {
                id: new_id(),
                access_policy: access_policy.to_string(),
            }],
            inputs,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedia {
    pub inputs: Vec<InputSource>,
    #[serde(default = "public")]
    pub access_policy: String,
    pub metadata: Option<BTreeMap<String, String>>,
    pub max_resolution: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InputSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedia {
    pub title: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaybackId {
    #[serde(default = "public")]
    pub access_policy: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackIdQuery {
    pub playback_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub upload_id: String,
    pub url: String,
    pub timeout: f64,
    pub status: String,
    pub cors_origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    pub push_media_settings: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpload {
    #[serde(default = "any_origin")]
    pub cors_origin: String,
    #[serde(default)]
    pub push_media_settings: serde_json::Value,
}

fn public() -> String {
    "public".to_string()
}

fn any_origin() -> String {
    "*".to_string()
}

pub async fn list_media(State(db): State<Db>, Query(paging): Query<Paging>) -> Reply {
    page(&db.read().await.media, paging)
}

pub async fn create_media(State(db): State<Db>, Json(input): Json<CreateMedia>) -> Reply {
    check_access_policy(&input.access_policy)?;
    if input.inputs.is_empty() {
        return Err(ApiError::bad_request("inputs must contain at least one entry"));
    }
    let inputs = input
        .inputs
        .into_iter()
        .map(|source| match source.url {
            Some(url) => Ok(InputInfo {
                kind: source.kind,
                url,
            }),
            None => Err(ApiError::bad_request(format!(
                "input of type {} has no url",
                source.kind
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut media = Media::new(&input.access_policy, input.max_resolution, inputs);
    media.metadata = input.metadata.unwrap_or_default();
    tracing::info!(media_id = %media.id, "media created");
    db.write().await.media.push(media.clone());
    reply(StatusCode::CREATED, &media)
}

pub async fn get_media(State(db): State<Db>, Path(media_id): Path<String>) -> Reply {
    let store = db.read().await;
    let media = store
        .media
        .iter()
        .find(|m| m.id == media_id)
        .ok_or_else(|| ApiError::not_found("Media", &media_id))?;
    reply(StatusCode::OK, media)
}

pub async fn update_media(
    State(db): State<Db>,
    Path(media_id): Path<String>,
    Json(input): Json<UpdateMedia>,
) -> Reply {
    let mut store = db.write().await;
    let media = find_media(&mut store.media, &media_id)?;
    if let Some(title) = input.title {
        media.title = Some(title);
    }
    if let Some(metadata) = input.metadata {
        media.metadata = metadata;
    }
    reply(StatusCode::OK, &*media)
}

pub async fn delete_media(State(db): State<Db>, Path(media_id): Path<String>) -> Reply {
    let mut store = db.write().await;
    let before = store.media.len();
    store.media.retain(|m| m.id != media_id);
    if store.media.len() == before {
        return Err(ApiError::not_found("Media", &media_id));
    }
    acknowledge()
}

pub async fn input_info(State(db): State<Db>, Path(media_id): Path<String>) -> Reply {
    let store = db.read().await;
    let media = store
        .media
        .iter()
        .find(|m| m.id == media_id)
        .ok_or_else(|| ApiError::not_found("Media", &media_id))?;
    reply(StatusCode::OK, &media.inputs)
}

pub async fn create_playback_id(
    State(db): State<Db>,
    Path(media_id): Path<String>,
    Json(input): Json<CreatePlaybackId>,
) -> Reply {
    check_access_policy(&input.access_policy)?;
    let mut store = db.write().await;
    let media = find_media(&mut store.media, &media_id)?;
    let playback_id = PlaybackId {
        id: new_id(),
        access_policy: input.access_policy,
    };
    media.playback_ids.push(playback_id.clone());
    reply(StatusCode::CREATED, &playback_id)
}

pub async fn get_playback_id(
    State(db): State<Db>,
    Path((media_id, playback_id)): Path<(String, String)>,
) -> Reply {
    let store = db.read().await;
    let media = store
        .media
        .iter()
        .find(|m| m.id == media_id)
        .ok_or_else(|| ApiError::not_found("Media", &media_id))?;
    let found = media
        .playback_ids
        .iter()
        .find(|p| p.id == playback_id)
        .ok_or_else(|| ApiError::not_found("Playback ID", &playback_id))?;
    reply(StatusCode::OK, found)
}

pub async fn delete_playback_id(
    State(db): State<Db>,
    Path(media_id): Path<String>,
    Query(query): Query<PlaybackIdQuery>,
) -> Reply {
    let mut store = db.write().await;
    let media = find_media(&mut store.media, &media_id)?;
    let before = media.playback_ids.len();
    media.playback_ids.retain(|p| p.id != query.playback_id);
    if media.playback_ids.len() == before {
        return Err(ApiError::not_found("Playback ID", &query.playback_id));
    }
    acknowledge()
}

pub async fn create_upload(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateUpload>,
) -> Reply {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("127.0.0.1");
    let mut settings = match input.push_media_settings {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    let policy = settings
        .entry("accessPolicy")
        .or_insert_with(|| serde_json::Value::String(public()));
    check_access_policy(policy.as_str().unwrap_or_default())?;

    let upload_id = new_id();
    let upload = Upload {
        url: format!("http://{host}/storage/uploads/{upload_id}"),
        upload_id,
        timeout: 14400.0,
        status: "waiting".to_string(),
        cors_origin: input.cors_origin,
        media_id: None,
        push_media_settings: serde_json::Value::Object(settings),
    };
    tracing::info!(upload_id = %upload.upload_id, "upload created");
    db.write().await.uploads.push(upload.clone());
    reply(StatusCode::CREATED, &upload)
}

pub async fn list_unused_uploads(State(db): State<Db>, Query(paging): Query<Paging>) -> Reply {
    let store = db.read().await;
    let waiting: Vec<&Upload> = store
        .uploads
        .iter()
        .filter(|u| u.status == "waiting")
        .collect();
    page(&waiting, paging)
}

pub async fn cancel_upload(State(db): State<Db>, Path(upload_id): Path<String>) -> Reply {
    let mut store = db.write().await;
    let upload = store
        .uploads
        .iter_mut()
        .find(|u| u.upload_id == upload_id)
        .ok_or_else(|| ApiError::not_found("Upload", &upload_id))?;
    if upload.status != "waiting" {
        return Err(ApiError::bad_request(format!(
            "upload {upload_id} is {} and cannot be cancelled",
            upload.status
        )));
    }
    upload.status = "cancelled".to_string();
    reply(StatusCode::OK, &*upload)
}

/// Accept the bytes of a waiting upload and turn it into media.
pub async fn receive_upload(
    State(db): State<Db>,
    Path(upload_id): Path<String>,
    body: Bytes,
) -> StatusCode {
    let mut store = db.write().await;
    let Some(upload) = store
        .uploads
        .iter_mut()
        .find(|u| u.upload_id == upload_id && u.status == "waiting")
    else {
        return StatusCode::NOT_FOUND;
    };
    if body.is_empty() {
        return StatusCode::BAD_REQUEST;
    }

    let policy = upload.push_media_settings["accessPolicy"]
        .as_str()
        .unwrap_or("public")
        .to_string();
    let media = Media::new(
        &policy,
        None,
        vec![InputInfo {
            kind: "video".to_string(),
            url: upload.url.clone(),
        }],
    );
    upload.status = "asset_created".to_string();
    upload.media_id = Some(media.id.clone());
    tracing::info!(%upload_id, media_id = %media.id, bytes = body.len(), "upload received");
    store.media.push(media);
    StatusCode::OK
}

fn find_media<'a>(media: &'a mut [Media], media_id: &str) -> Result<&'a mut Media, ApiError> {
    media
        .iter_mut()
        .find(|m| m.id == media_id)
        .ok_or_else(|| ApiError::not_found("Media", media_id))
}
