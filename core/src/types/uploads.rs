//! Direct uploads.

use serde::{Deserialize, Serialize};

use super::ai::{Moderation, SummaryRequest};
use super::media::Input;
use super::playback::AccessRestrictions;
use super::Metadata;
use crate::enums::{AccessPolicy, MediaQuality, Mp4Support, Resolution};

/// Seconds a signed upload URL stays valid unless the server says otherwise.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: f64 = 14400.0;

fn default_upload_timeout() -> f64 {
    DEFAULT_UPLOAD_TIMEOUT_SECS
}

fn default_cors_origin() -> String {
    "*".to_string()
}

/// Body of `POST /on-demand/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectUploadRequest {
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_media_settings: Option<PushMediaSettings>,
}

impl Default for DirectUploadRequest {
    fn default() -> Self {
        Self {
            cors_origin: default_cors_origin(),
            push_media_settings: None,
        }
    }
}

/// Settings applied to the media created once the upload completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMediaSettings {
    #[serde(default)]
    pub access_policy: AccessPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<Input>>,
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

/// A signed upload slot. PUT the file to `url` before `timeout` seconds pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectUpload {
    #[serde(alias = "id")]
    pub upload_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_upload_timeout")]
    pub timeout: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_media_settings: Option<PushMediaSettings>,
}
