//! `/v1/on-demand/playlists`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::on_demand::Media;
use crate::{acknowledge, new_id, page, reply, ApiError, Db, Paging, Reply};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub reference_id: String,
    #[serde(rename = "type")]
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub play_order: String,
    pub media_count: usize,
    #[serde(default)]
    pub media_list: Vec<PlaylistMedia>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMedia {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylist {
    pub name: String,
    pub reference_id: String,
    #[serde(rename = "type")]
    pub mode: String,
    pub description: Option<String>,
    pub play_order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylist {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaIds {
    pub media_ids: Vec<String>,
}

pub async fn list_playlists(State(db): State<Db>, Query(paging): Query<Paging>) -> Reply {
    page(&db.read().await.playlists, paging)
}

pub async fn create_playlist(State(db): State<Db>, Json(input): Json<CreatePlaylist>) -> Reply {
    if input.mode != "manual" && input.mode != "smart" {
        return Err(ApiError::bad_request("type must be manual or smart"));
    }
    let mut store = db.write().await;
    if store
        .playlists
        .iter()
        .any(|p| p.reference_id == input.reference_id)
    {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "Conflict",
            format!("referenceId {} is already in use", input.reference_id),
        ));
    }

    let playlist = Playlist {
        id: new_id(),
        name: input.name,
        reference_id: input.reference_id,
        mode: input.mode,
        description: input.description,
        play_order: input
            .play_order
            .unwrap_or_else(|| "createdDate ASC".to_string()),
        media_count: 0,
        media_list: Vec::new(),
    };
    tracing::info!(playlist_id = %playlist.id, "playlist created");
    store.playlists.push(playlist.clone());
    reply(StatusCode::CREATED, &playlist)
}

pub async fn get_playlist(State(db): State<Db>, Path(playlist_id): Path<String>) -> Reply {
    let store = db.read().await;
    let playlist = store
        .playlists
        .iter()
        .find(|p| p.id == playlist_id)
        .ok_or_else(|| ApiError::not_found("Playlist", &playlist_id))?;
    reply(StatusCode::OK, playlist)
}

pub async fn update_playlist(
    State(db): State<Db>,
    Path(playlist_id): Path<String>,
    Json(input): Json<UpdatePlaylist>,
) -> Reply {
    let mut store = db.write().await;
    let playlist = find_playlist(&mut store.playlists, &playlist_id)?;
    if let Some(name) = input.name {
        playlist.name = name;
    }
    if let Some(description) = input.description {
        playlist.description = Some(description);
    }
    reply(StatusCode::OK, &*playlist)
}

pub async fn delete_playlist(State(db): State<Db>, Path(playlist_id): Path<String>) -> Reply {
    let mut store = db.write().await;
    let before = store.playlists.len();
    store.playlists.retain(|p| p.id != playlist_id);
    if store.playlists.len() == before {
        return Err(ApiError::not_found("Playlist", &playlist_id));
    }
    acknowledge()
}

/// Append media that exist and are not yet in the playlist.
pub async fn add_media(
    State(db): State<Db>,
    Path(playlist_id): Path<String>,
    Json(input): Json<MediaIds>,
) -> Reply {
    let mut guard = db.write().await;
    let store = &mut *guard;
    let playlist = find_playlist(&mut store.playlists, &playlist_id)?;
    if playlist.mode != "manual" {
        return Err(ApiError::bad_request("media can only be added to manual playlists"));
    }
    for media_id in &input.media_ids {
        let media = lookup_media(&store.media, media_id)?;
        if !playlist.media_list.iter().any(|m| m.id == media.id) {
            playlist.media_list.push(PlaylistMedia {
                id: media.id.clone(),
                title: media.title.clone(),
            });
        }
    }
    playlist.media_count = playlist.media_list.len();
    reply(StatusCode::OK, &*playlist)
}

/// The new order must name exactly the current members.
pub async fn reorder_media(
    State(db): State<Db>,
    Path(playlist_id): Path<String>,
    Json(input): Json<MediaIds>,
) -> Reply {
    let mut store = db.write().await;
    let playlist = find_playlist(&mut store.playlists, &playlist_id)?;

    let mut current: Vec<&str> = playlist.media_list.iter().map(|m| m.id.as_str()).collect();
    let mut requested: Vec<&str> = input.media_ids.iter().map(String::as_str).collect();
    current.sort_unstable();
    requested.sort_unstable();
    if current != requested {
        return Err(ApiError::bad_request(
            "mediaIds must list every media in the playlist exactly once",
        ));
    }

    let mut reordered = Vec::with_capacity(input.media_ids.len());
    for media_id in &input.media_ids {
        if let Some(entry) = playlist.media_list.iter().find(|m| &m.id == media_id) {
            reordered.push(entry.clone());
        }
    }
    playlist.media_list = reordered;
    reply(StatusCode::OK, &*playlist)
}

pub async fn remove_media(
    State(db): State<Db>,
    Path(playlist_id): Path<String>,
    Json(input): Json<MediaIds>,
) -> Reply {
    let mut store = db.write().await;
    let playlist = find_playlist(&mut store.playlists, &playlist_id)?;
    playlist
        .media_list
        .retain(|m| !input.media_ids.contains(&m.id));
    playlist.media_count = playlist.media_list.len();
    reply(StatusCode::OK, &*playlist)
}

fn find_playlist<'a>(
    playlists: &'a mut [Playlist],
    playlist_id: &str,
) -> Result<&'a mut Playlist, ApiError> {
    playlists
        .iter_mut()
        .find(|p| p.id == playlist_id)
        .ok_or_else(|| ApiError::not_found("Playlist", playlist_id))
}

fn lookup_media<'a>(media: &'a [Media], media_id: &str) -> Result<&'a Media, ApiError> {
    media
        .iter()
        .find(|m| m.id == media_id)
        .ok_or_else(|| ApiError::bad_request(format!("media {media_id} does not exist")))
}
