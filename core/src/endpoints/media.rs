//! On-demand media.

use super::Response;
use crate::client::FastPix;
use crate::error::Result;
use crate::http::{ApiResponse, HttpMethod};
use crate::request::{Call, Operation, Server};
use crate::types::media::{CreateMediaRequest, InputInfo, Media, UpdateMediaRequest};
use crate::types::{Acknowledgement, ListParams};

pub const CREATE_MEDIA: Operation =
    Operation::new("create-media", HttpMethod::Post, Server::Api, "/on-demand");
pub const LIST_MEDIA: Operation =
    Operation::new("list-media", HttpMethod::Get, Server::Api, "/on-demand");
pub const GET_MEDIA: Operation = Operation::new(
    "get-media",
    HttpMethod::Get,
    Server::Api,
    "/on-demand/{mediaId}",
);
pub const UPDATE_MEDIA: Operation = Operation::new(
    "update-media",
    HttpMethod::Patch,
    Server::Api,
    "/on-demand/{mediaId}",
);
pub const DELETE_MEDIA: Operation = Operation::new(
    "delete-media",
    HttpMethod::Delete,
    Server::Api,
    "/on-demand/{mediaId}",
);
pub const GET_MEDIA_INPUT_INFO: Operation = Operation::new(
    "get-media-input-info",
    HttpMethod::Get,
    Server::Api,
    "/on-demand/{mediaId}/input-info",
);

#[derive(Debug, Clone, Copy)]
pub struct MediaEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> MediaEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    /// Ingest media from one or more public URLs.
    pub async fn create_from_url(&self, request: &CreateMediaRequest) -> Result<Response<Media>> {
        let call = Call::new().json(request)?;
        self.client.execute(&CREATE_MEDIA, call).await
    }

    pub async fn list(&self, params: ListParams) -> Result<Response<Vec<Media>>> {
        self.client.execute(&LIST_MEDIA, params.apply(Call::new())).await
    }

    pub async fn get(&self, media_id: &str) -> Result<Response<Media>> {
        let call = Call::new().path("mediaId", media_id);
        self.client.execute(&GET_MEDIA, call).await
    }

    pub async fn update(
        &self,
        media_id: &str,
        request: &UpdateMediaRequest,
    ) -> Result<Response<Media>> {
        let call = Call::new().path("mediaId", media_id).json(request)?;
        self.client.execute(&UPDATE_MEDIA, call).await
    }

    pub async fn delete(&self, media_id: &str) -> Result<ApiResponse<Acknowledgement>> {
        let call = Call::new().path("mediaId", media_id);
        self.client.execute(&DELETE_MEDIA, call).await
    }

    /// Probe results for each input the media was created from.
    pub async fn input_info(&self, media_id: &str) -> Result<Response<Vec<InputInfo>>> {
        let call = Call::new().path("mediaId", media_id);
        self.client.execute(&GET_MEDIA_INPUT_INFO, call).await
    }
}
