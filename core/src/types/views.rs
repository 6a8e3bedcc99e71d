//! Video-view analytics.

use serde::{Deserialize, Serialize};

use crate::enums::SortOrder;

/// Filters shared by the view list and top-content operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewsQuery {
    /// Time windows such as `"24:hours"` or `"7:days"`; sent as `timespan[]`.
    pub timespan: Vec<String>,
    /// Dimension filters such as `"browser_name:Chrome"`; sent as `filterby[]`.
    pub filters: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ViewsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timespan(mut self, span: impl Into<String>) -> Self {
        self.timespan.push(span.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub view_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_watch_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_of_experience_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_viewers: Option<u64>,
}
