//! Live streams. All operations resolve against the live server URL.

use super::Response;
use crate::client::FastPix;
use crate::error::Result;
use crate::http::{ApiResponse, HttpMethod};
use crate::request::{Call, Operation, Server};
use crate::types::live::{CreateLiveStreamRequest, LiveStream, UpdateLiveStreamRequest};
use crate::types::{Acknowledgement, ListParams};

pub const CREATE_STREAM: Operation =
    Operation::new("create-new-stream", HttpMethod::Post, Server::Live, "/streams");
pub const LIST_STREAMS: Operation =
    Operation::new("get-all-streams", HttpMethod::Get, Server::Live, "/streams");
pub const GET_STREAM: Operation = Operation::new(
    "get-live-stream-by-id",
    HttpMethod::Get,
    Server::Live,
    "/streams/{streamId}",
);
pub const UPDATE_STREAM: Operation = Operation::new(
    "update-live-stream",
    HttpMethod::Patch,
    Server::Live,
    "/streams/{streamId}",
);
pub const DELETE_STREAM: Operation = Operation::new(
    "delete-live-stream",
    HttpMethod::Delete,
    Server::Live,
    "/streams/{streamId}",
);
pub const ENABLE_STREAM: Operation = Operation::new(
    "enable-live-stream",
    HttpMethod::Put,
    Server::Live,
    "/streams/{streamId}/live-enable",
);
pub const DISABLE_STREAM: Operation = Operation::new(
    "disable-live-stream",
    HttpMethod::Put,
    Server::Live,
    "/streams/{streamId}/live-disable",
);
pub const COMPLETE_STREAM: Operation = Operation::new(
    "complete-live-stream",
    HttpMethod::Put,
    Server::Live,
    "/streams/{streamId}/finish",
);

#[derive(Debug, Clone, Copy)]
pub struct LiveStreamEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> LiveStreamEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateLiveStreamRequest) -> Result<Response<LiveStream>> {
        let call = Call::new().json(request)?;
        self.client.execute(&CREATE_STREAM, call).await
    }

    pub async fn list(&self, params: ListParams) -> Result<Response<Vec<LiveStream>>> {
        self.client
            .execute(&LIST_STREAMS, params.apply(Call::new()))
            .await
    }

    pub async fn get(&self, stream_id: &str) -> Result<Response<LiveStream>> {
        self.client.execute(&GET_STREAM, stream(stream_id)).await
    }

    pub async fn update(
        &self,
        stream_id: &str,
        request: &UpdateLiveStreamRequest,
    ) -> Result<Response<LiveStream>> {
        let call = stream(stream_id).json(request)?;
        self.client.execute(&UPDATE_STREAM, call).await
    }

    pub async fn delete(&self, stream_id: &str) -> Result<ApiResponse<Acknowledgement>> {
        self.client.execute(&DELETE_STREAM, stream(stream_id)).await
    }

    pub async fn enable(&self, stream_id: &str) -> Result<ApiResponse<Acknowledgement>> {
        self.client.execute(&ENABLE_STREAM, stream(stream_id)).await
    }

    pub async fn disable(&self, stream_id: &str) -> Result<ApiResponse<Acknowledgement>> {
        self.client.execute(&DISABLE_STREAM, stream(stream_id)).await
    }

    /// End the broadcast and finalise the recording.
    pub async fn complete(&self, stream_id: &str) -> Result<ApiResponse<Acknowledgement>> {
        self.client.execute(&COMPLETE_STREAM, stream(stream_id)).await
    }
}

fn stream(stream_id: &str) -> Call {
    Call::new().path("streamId", stream_id)
}
