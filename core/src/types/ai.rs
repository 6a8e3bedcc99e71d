//! In-video AI features: summaries, chapters, named entities, moderation.

use serde::{Deserialize, Serialize};

use crate::enums::ModerationType;

/// Body of `PATCH /on-demand/{mediaId}/summary`; also embedded in create
/// requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub generate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaptersRequest {
    pub chapters: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedEntitiesRequest {
    pub named_entities: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moderation {
    #[serde(rename = "type")]
    pub kind: ModerationType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRequest {
    pub moderation: Moderation,
}

/// Acknowledgement of an AI feature change. The echoed settings differ per
/// feature and are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiFeatureUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}
