//! Playback IDs of media and live streams.

use super::Response;
use crate::client::FastPix;
use crate::error::Result;
use crate::http::{ApiResponse, HttpMethod};
use crate::request::{Call, Operation, Server};
use crate::types::playback::{CreatePlaybackIdRequest, PlaybackId};
use crate::types::Acknowledgement;

pub const CREATE_MEDIA_PLAYBACK_ID: Operation = Operation::new(
    "create-media-playback-id",
    HttpMethod::Post,
    Server::Api,
    "/on-demand/{mediaId}/playback-ids",
);
pub const GET_MEDIA_PLAYBACK_ID: Operation = Operation::new(
    "get-media-playback-id",
    HttpMethod::Get,
    Server::Api,
    "/on-demand/{mediaId}/playback-ids/{playbackId}",
);
pub const DELETE_MEDIA_PLAYBACK_ID: Operation = Operation::new(
    "delete-media-playback-id",
    HttpMethod::Delete,
    Server::Api,
    "/on-demand/{mediaId}/playback-ids",
);
pub const CREATE_STREAM_PLAYBACK_ID: Operation = Operation::new(
    "create-playbackId-of-stream",
    HttpMethod::Post,
    Server::Live,
    "/streams/{streamId}/playback-ids",
);
pub const GET_STREAM_PLAYBACK_ID: Operation = Operation::new(
    "get-live-stream-playback-id",
    HttpMethod::Get,
    Server::Live,
    "/streams/{streamId}/playback-ids/{playbackId}",
);
pub const DELETE_STREAM_PLAYBACK_ID: Operation = Operation::new(
    "delete-playbackId-of-stream",
    HttpMethod::Delete,
    Server::Live,
    "/streams/{streamId}/playback-ids",
);

#[derive(Debug, Clone, Copy)]
pub struct PlaybackEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> PlaybackEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    pub async fn create_for_media(
        &self,
        media_id: &str,
        request: &CreatePlaybackIdRequest,
    ) -> Result<Response<PlaybackId>> {
        let call = Call::new().path("mediaId", media_id).json(request)?;
        self.client.execute(&CREATE_MEDIA_PLAYBACK_ID, call).await
    }

    pub async fn get_for_media(
        &self,
        media_id: &str,
        playback_id: &str,
    ) -> Result<Response<PlaybackId>> {
        let call = Call::new()
            .path("mediaId", media_id)
            .path("playbackId", playback_id);
        self.client.execute(&GET_MEDIA_PLAYBACK_ID, call).await
    }

    /// The playback ID goes in the query string, not the path.
    pub async fn delete_for_media(
        &self,
        media_id: &str,
        playback_id: &str,
    ) -> Result<ApiResponse<Acknowledgement>> {
        let call = Call::new()
            .path("mediaId", media_id)
            .required_query("playbackId", playback_id);
        self.client.execute(&DELETE_MEDIA_PLAYBACK_ID, call).await
    }

    pub async fn create_for_stream(
        &self,
        stream_id: &str,
        request: &CreatePlaybackIdRequest,
    ) -> Result<Response<PlaybackId>> {
        let call = Call::new().path("streamId", stream_id).json(request)?;
        self.client.execute(&CREATE_STREAM_PLAYBACK_ID, call).await
    }

    pub async fn get_for_stream(
        &self,
        stream_id: &str,
        playback_id: &str,
    ) -> Result<Response<PlaybackId>> {
        let call = Call::new()
            .path("streamId", stream_id)
            .path("playbackId", playback_id);
        self.client.execute(&GET_STREAM_PLAYBACK_ID, call).await
    }

    pub async fn delete_for_stream(
        &self,
        stream_id: &str,
        playback_id: &str,
    ) -> Result<ApiResponse<Acknowledgement>> {
        let call = Call::new()
            .path("streamId", stream_id)
            .required_query("playbackId", playback_id);
        self.client.execute(&DELETE_STREAM_PLAYBACK_ID, call).await
    }
}
