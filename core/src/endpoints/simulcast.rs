//! Restreaming a live stream to third-party RTMP targets.

use super::Response;
use crate::client::FastPix;
use crate::error::Result;
use crate::http::{ApiResponse, HttpMethod};
use crate::request::{Call, Operation, Server};
use crate::types::simulcast::{Simulcast, SimulcastRequest, SimulcastUpdateRequest};
use crate::types::Acknowledgement;

pub const CREATE_SIMULCAST: Operation = Operation::new(
    "create-simulcast-of-stream",
    HttpMethod::Post,
    Server::Live,
    "/streams/{streamId}/simulcast",
);
pub const GET_SIMULCAST: Operation = Operation::new(
    "get-specific-simulcast-of-stream",
    HttpMethod::Get,
    Server::Live,
    "/streams/{streamId}/simulcast/{simulcastId}",
);
pub const UPDATE_SIMULCAST: Operation = Operation::new(
    "update-specific-simulcast-of-stream",
    HttpMethod::Put,
    Server::Live,
    "/streams/{streamId}/simulcast/{simulcastId}",
);
pub const DELETE_SIMULCAST: Operation = Operation::new(
    "delete-simulcast-of-stream",
    HttpMethod::Delete,
    Server::Live,
    "/streams/{streamId}/simulcast/{simulcastId}",
);

#[derive(Debug, Clone, Copy)]
pub struct SimulcastEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> SimulcastEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        stream_id: &str,
        request: &SimulcastRequest,
    ) -> Result<Response<Simulcast>> {
        let call = Call::new().path("streamId", stream_id).json(request)?;
        self.client.execute(&CREATE_SIMULCAST, call).await
    }

    pub async fn get(&self, stream_id: &str, simulcast_id: &str) -> Result<Response<Simulcast>> {
        let call = target(stream_id, simulcast_id);
        self.client.execute(&GET_SIMULCAST, call).await
    }

    pub async fn update(
        &self,
        stream_id: &str,
        simulcast_id: &str,
        request: &SimulcastUpdateRequest,
    ) -> Result<Response<Simulcast>> {
        let call = target(stream_id, simulcast_id).json(request)?;
        self.client.execute(&UPDATE_SIMULCAST, call).await
    }

    pub async fn delete(
        &self,
        stream_id: &str,
        simulcast_id: &str,
    ) -> Result<ApiResponse<Acknowledgement>> {
        let call = target(stream_id, simulcast_id);
        self.client.execute(&DELETE_SIMULCAST, call).await
    }
}

fn target(stream_id: &str, simulcast_id: &str) -> Call {
    Call::new()
        .path("streamId", stream_id)
        .path("simulcastId", simulcast_id)
}
