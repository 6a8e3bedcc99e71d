//! In-video AI features. Each one is switched on per media with a PATCH.

use super::Response;
use crate::client::FastPix;
use crate::enums::ModerationType;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::{Call, Operation, Server};
use crate::types::ai::{
    AiFeatureUpdate, ChaptersRequest, Moderation, ModerationRequest, NamedEntitiesRequest,
    SummaryRequest,
};

pub const UPDATE_SUMMARY: Operation = Operation::new(
    "update-media-summary",
    HttpMethod::Patch,
    Server::Api,
    "/on-demand/{mediaId}/summary",
);
pub const UPDATE_CHAPTERS: Operation = Operation::new(
    "update-media-chapters",
    HttpMethod::Patch,
    Server::Api,
    "/on-demand/{mediaId}/chapters",
);
pub const UPDATE_NAMED_ENTITIES: Operation = Operation::new(
    "update-media-named-entities",
    HttpMethod::Patch,
    Server::Api,
    "/on-demand/{mediaId}/named-entities",
);
pub const UPDATE_MODERATION: Operation = Operation::new(
    "update-media-moderation",
    HttpMethod::Patch,
    Server::Api,
    "/on-demand/{mediaId}/moderation",
);

#[derive(Debug, Clone, Copy)]
pub struct MediaAiEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> MediaAiEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    /// Generate a summary. `summary_length` is a word count.
    pub async fn summary(
        &self,
        media_id: &str,
        summary_length: Option<u32>,
    ) -> Result<Response<AiFeatureUpdate>> {
        let body = SummaryRequest {
            generate: true,
            summary_length,
        };
        self.patch(&UPDATE_SUMMARY, media_id, &body).await
    }

    pub async fn chapters(&self, media_id: &str, enabled: bool) -> Result<Response<AiFeatureUpdate>> {
        let body = ChaptersRequest { chapters: enabled };
        self.patch(&UPDATE_CHAPTERS, media_id, &body).await
    }

    pub async fn named_entities(
        &self,
        media_id: &str,
        enabled: bool,
    ) -> Result<Response<AiFeatureUpdate>> {
        let body = NamedEntitiesRequest {
            named_entities: enabled,
        };
        self.patch(&UPDATE_NAMED_ENTITIES, media_id, &body).await
    }

    pub async fn moderation(
        &self,
        media_id: &str,
        kind: ModerationType,
    ) -> Result<Response<AiFeatureUpdate>> {
        let body = ModerationRequest {
            moderation: Moderation { kind },
        };
        self.patch(&UPDATE_MODERATION, media_id, &body).await
    }

    async fn patch<B: serde::Serialize>(
        &self,
        operation: &'static Operation,
        media_id: &str,
        body: &B,
    ) -> Result<Response<AiFeatureUpdate>> {
        let call = Call::new().path("mediaId", media_id).json(body)?;
        self.client.execute(operation, call).await
    }
}
