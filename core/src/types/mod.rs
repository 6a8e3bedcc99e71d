//! Request and response models.
//!
//! # Design
//! Every response is wrapped in the same `Envelope<T>` (`success`, `data`,
//! optional `pagination`), so the per-resource modules only describe the
//! `data` payloads and the request bodies. Fields are camelCase on the wire.
//! Optional fields are `Option` and left out of serialized bodies when unset;
//! fields the server always needs carry a default instead. Unknown incoming
//! fields are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::SortOrder;
use crate::request::Call;

pub mod ai;
pub mod drm;
pub mod live;
pub mod media;
pub mod playback;
pub mod playlists;
pub mod signing_keys;
pub mod simulcast;
pub mod uploads;
pub mod views;

/// Free-form key/value metadata attached to media and streams.
pub type Metadata = BTreeMap<String, String>;

/// Standard response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Envelope whose `data` is not modelled, e.g. the reply to a delete.
pub type Acknowledgement = Envelope<serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_count: Option<u64>,
}

/// `limit` / `offset` / `orderBy` for list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order_by: Option<SortOrder>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order_by(mut self, order: SortOrder) -> Self {
        self.order_by = Some(order);
        self
    }

    pub(crate) fn apply(&self, call: Call) -> Call {
        call.query("limit", self.limit)
            .query("offset", self.offset)
            .query("orderBy", self.order_by)
    }
}
