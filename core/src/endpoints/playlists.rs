//! Playlists of on-demand media.

use super::Response;
use crate::client::FastPix;
use crate::error::Result;
use crate::http::{ApiResponse, HttpMethod};
use crate::request::{Call, Operation, Server};
use crate::types::playlists::{
    CreatePlaylistRequest, MediaIdsRequest, Playlist, UpdatePlaylistRequest,
};
use crate::types::{Acknowledgement, ListParams};

pub const CREATE_PLAYLIST: Operation = Operation::new(
    "create-a-playlist",
    HttpMethod::Post,
    Server::Api,
    "/on-demand/playlists",
);
pub const LIST_PLAYLISTS: Operation = Operation::new(
    "get-all-playlists",
    HttpMethod::Get,
    Server::Api,
    "/on-demand/playlists",
);
pub const GET_PLAYLIST: Operation = Operation::new(
    "get-playlist-by-id",
    HttpMethod::Get,
    Server::Api,
    "/on-demand/playlists/{playlistId}",
);
pub const UPDATE_PLAYLIST: Operation = Operation::new(
    "update-a-playlist",
    HttpMethod::Put,
    Server::Api,
    "/on-demand/playlists/{playlistId}",
);
pub const DELETE_PLAYLIST: Operation = Operation::new(
    "delete-a-playlist",
    HttpMethod::Delete,
    Server::Api,
    "/on-demand/playlists/{playlistId}",
);
pub const ADD_PLAYLIST_MEDIA: Operation = Operation::new(
    "add-media-to-playlist",
    HttpMethod::Patch,
    Server::Api,
    "/on-demand/playlists/{playlistId}/media",
);
pub const REORDER_PLAYLIST_MEDIA: Operation = Operation::new(
    "change-media-order-in-playlist",
    HttpMethod::Put,
    Server::Api,
    "/on-demand/playlists/{playlistId}/media",
);
pub const REMOVE_PLAYLIST_MEDIA: Operation = Operation::new(
    "delete-media-from-playlist",
    HttpMethod::Delete,
    Server::Api,
    "/on-demand/playlists/{playlistId}/media",
);

#[derive(Debug, Clone, Copy)]
pub struct PlaylistEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> PlaylistEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreatePlaylistRequest) -> Result<Response<Playlist>> {
        let call = Call::new().json(request)?;
        self.client.execute(&CREATE_PLAYLIST, call).await
    }

    pub async fn list(&self, params: ListParams) -> Result<Response<Vec<Playlist>>> {
        self.client
            .execute(&LIST_PLAYLISTS, params.apply(Call::new()))
            .await
    }

    pub async fn get(&self, playlist_id: &str) -> Result<Response<Playlist>> {
        self.client
            .execute(&GET_PLAYLIST, playlist(playlist_id))
            .await
    }

    pub async fn update(
        &self,
        playlist_id: &str,
        request: &UpdatePlaylistRequest,
    ) -> Result<Response<Playlist>> {
        let call = playlist(playlist_id).json(request)?;
        self.client.execute(&UPDATE_PLAYLIST, call).await
    }

    pub async fn delete(&self, playlist_id: &str) -> Result<ApiResponse<Acknowledgement>> {
        self.client
            .execute(&DELETE_PLAYLIST, playlist(playlist_id))
            .await
    }

    /// Append media to a manual playlist.
    pub async fn add_media<I, S>(&self, playlist_id: &str, media_ids: I) -> Result<Response<Playlist>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let call = playlist(playlist_id).json(&media_ids_body(media_ids))?;
        self.client.execute(&ADD_PLAYLIST_MEDIA, call).await
    }

    /// Replace the order of a playlist. `media_ids` must list every member.
    pub async fn reorder_media<I, S>(
        &self,
        playlist_id: &str,
        media_ids: I,
    ) -> Result<Response<Playlist>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let call = playlist(playlist_id).json(&media_ids_body(media_ids))?;
        self.client.execute(&REORDER_PLAYLIST_MEDIA, call).await
    }

    /// Remove media from a playlist. This DELETE carries a JSON body.
    pub async fn remove_media<I, S>(
        &self,
        playlist_id: &str,
        media_ids: I,
    ) -> Result<Response<Playlist>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let call = playlist(playlist_id).json(&media_ids_body(media_ids))?;
        self.client.execute(&REMOVE_PLAYLIST_MEDIA, call).await
    }
}

fn playlist(playlist_id: &str) -> Call {
    Call::new().path("playlistId", playlist_id)
}

fn media_ids_body<I, S>(media_ids: I) -> MediaIdsRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MediaIdsRequest {
        media_ids: media_ids.into_iter().map(Into::into).collect(),
    }
}
