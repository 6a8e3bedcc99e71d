//! Live streams.

use serde::{Deserialize, Serialize};

use super::playback::PlaybackId;
use super::Metadata;
use crate::enums::{AccessPolicy, LiveResolution, MediaPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStream {
    #[serde(alias = "id")]
    pub stream_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srt_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_resolution: Option<LiveResolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnect_window: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_recording: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dvr_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_policy: Option<MediaPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_latency: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playback_ids: Vec<PlaybackId>,
}

/// Body of `POST /streams`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiveStreamRequest {
    pub playback_settings: PlaybackSettings,
    pub input_media_settings: InputMediaSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_policy: Option<AccessPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMediaSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_resolution: Option<LiveResolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnect_window: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_policy: Option<MediaPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dvr_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body of `PATCH /streams/{streamId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLiveStreamRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnect_window: Option<u32>,
}
