//! Video-view analytics.

use super::Response;
use crate::client::FastPix;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::{Call, Operation, QueryStyle, Server};
use crate::types::views::{TopContent, View, ViewsQuery};

pub const LIST_VIEWS: Operation = Operation::new(
    "list-video-views",
    HttpMethod::Get,
    Server::Api,
    "/data/viewlist",
);
pub const GET_VIEW: Operation = Operation::new(
    "get-video-view-details",
    HttpMethod::Get,
    Server::Api,
    "/data/viewlist/{viewId}",
);
pub const LIST_TOP_CONTENT: Operation = Operation::new(
    "list-by-top-content",
    HttpMethod::Get,
    Server::Api,
    "/data/viewlist/top-content",
);

const EXPLODED: QueryStyle = QueryStyle::Form { explode: true };

#[derive(Debug, Clone, Copy)]
pub struct ViewEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> ViewEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ViewsQuery) -> Result<Response<Vec<View>>> {
        self.client.execute(&LIST_VIEWS, filtered(query)).await
    }

    pub async fn get(&self, view_id: &str) -> Result<Response<View>> {
        let call = Call::new().path("viewId", view_id);
        self.client.execute(&GET_VIEW, call).await
    }

    pub async fn top_content(&self, query: &ViewsQuery) -> Result<Response<Vec<TopContent>>> {
        self.client.execute(&LIST_TOP_CONTENT, filtered(query)).await
    }
}

fn filtered(query: &ViewsQuery) -> Call {
    Call::new()
        .query_list("timespan[]", &query.timespan, EXPLODED)
        .query_list("filterby[]", &query.filters, EXPLODED)
        .query("limit", query.limit)
        .query("offset", query.offset)
        .query("orderBy", query.order_by.as_deref())
        .query("sortOrder", query.sort_order)
}
