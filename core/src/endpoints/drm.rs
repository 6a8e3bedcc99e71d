use super::Response;
use crate::client::FastPix;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::{Call, Operation, Server};
use crate::types::drm::DrmConfiguration;
use crate::types::ListParams;

pub const LIST_DRM_CONFIGURATIONS: Operation = Operation::new(
    "get-drm-configuration",
    HttpMethod::Get,
    Server::Api,
    "/on-demand/drm-configurations",
);
pub const GET_DRM_CONFIGURATION: Operation = Operation::new(
    "get-drm-configuration-by-id",
    HttpMethod::Get,
    Server::Api,
    "/on-demand/drm-configurations/{drmConfigurationId}",
);

#[derive(Debug, Clone, Copy)]
pub struct DrmConfigurationEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> DrmConfigurationEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: ListParams) -> Result<Response<Vec<DrmConfiguration>>> {
        self.client
            .execute(&LIST_DRM_CONFIGURATIONS, params.apply(Call::new()))
            .await
    }

    pub async fn get(&self, drm_configuration_id: &str) -> Result<Response<DrmConfiguration>> {
        let call = Call::new().path("drmConfigurationId", drm_configuration_id);
        self.client.execute(&GET_DRM_CONFIGURATION, call).await
    }
}
