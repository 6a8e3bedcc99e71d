//! On-demand media.

use serde::{Deserialize, Serialize};

use super::ai::{Moderation, SummaryRequest};
use super::playback::{AccessRestrictions, PlaybackId};
use super::Metadata;
use crate::enums::{AccessPolicy, LanguageCode, MediaQuality, Mp4Support, Resolution};

/// A video or audio asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_resolution: Option<Resolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_resolution: Option<Resolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_quality: Option<MediaQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp4_support: Option<Mp4Support>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playback_ids: Vec<PlaybackId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,
}

/// Body of `POST /on-demand`: create media from one or more public URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaRequest {
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub access_policy: AccessPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_resolution: Option<Resolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_quality: Option<MediaQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp4_support: Option<Mp4Support>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_restrictions: Option<AccessRestrictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_entities: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderation: Option<Moderation>,
}

impl CreateMediaRequest {
    /// Request for a single video input with default settings.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            inputs: vec![Input::video(url)],
            ..Self::default()
        }
    }
}

/// One source of a media asset, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Input {
    Video(VideoInput),
    Watermark(WatermarkInput),
    Audio(AudioInput),
    Subtitle(SubtitleInput),
}

impl Input {
    pub fn video(url: impl Into<String>) -> Self {
        Input::Video(VideoInput {
            url: url.into(),
            start_time: None,
            end_time: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInput {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkInput {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_margin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioInput {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imposition: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleInput {
    pub url: String,
    pub language_code: LanguageCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,
}

/// Body of `PATCH /on-demand/{mediaId}`. Only the fields that are set change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMediaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// One entry of `GET /on-demand/{mediaId}/input-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
