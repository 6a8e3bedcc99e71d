//! Direct uploads.
//!
//! A direct upload is a two-step flow: `create_direct_upload` returns a
//! pre-signed URL, then the caller sends the file bytes there with
//! [`put_payload`]. The second step talks to storage, not to the API, so it
//! carries no credentials and does not go through the client.

use bytes::Bytes;

use super::Response;
use crate::client::FastPix;
use crate::error::{Error, Result};
use crate::http::{ApiResponse, HttpMethod, HttpResponse};
use crate::request::{Call, Operation, Server};
use crate::transport::{collect_headers, map_reqwest_error};
use crate::types::uploads::{DirectUpload, DirectUploadRequest};
use crate::types::{Acknowledgement, ListParams};

pub const CREATE_DIRECT_UPLOAD: Operation = Operation::new(
    "direct-upload-video-media",
    HttpMethod::Post,
    Server::Api,
    "/on-demand/upload",
);
pub const LIST_UNUSED_UPLOADS: Operation = Operation::new(
    "list-uploads",
    HttpMethod::Get,
    Server::Api,
    "/on-demand/uploads",
);
pub const CANCEL_UPLOAD: Operation = Operation::new(
    "cancel-upload",
    HttpMethod::Put,
    Server::Api,
    "/on-demand/upload/{uploadId}/cancel",
);

#[derive(Debug, Clone, Copy)]
pub struct UploadEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> UploadEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    pub async fn create_direct_upload(
        &self,
        request: &DirectUploadRequest,
    ) -> Result<Response<DirectUpload>> {
        let call = Call::new().json(request)?;
        self.client.execute(&CREATE_DIRECT_UPLOAD, call).await
    }

    /// Uploads that were created but never received a file.
    pub async fn list_unused(&self, params: ListParams) -> Result<Response<Vec<DirectUpload>>> {
        self.client
            .execute(&LIST_UNUSED_UPLOADS, params.apply(Call::new()))
            .await
    }

    pub async fn cancel(&self, upload_id: &str) -> Result<ApiResponse<Acknowledgement>> {
        let call = Call::new().path("uploadId", upload_id);
        self.client.execute(&CANCEL_UPLOAD, call).await
    }
}

/// PUT the file bytes to a pre-signed upload URL.
///
/// No `Authorization` header is sent. A malformed `url` is
/// `Error::InvalidUrl`; a non-2xx reply is `Error::UnexpectedStatus`.
pub async fn put_payload(
    http: &reqwest::Client,
    url: &str,
    payload: impl Into<Bytes>,
    content_type: &str,
) -> Result<HttpResponse> {
    let target = url::Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let payload = payload.into();
    tracing::debug!(bytes = payload.len(), "uploading payload");

    let response = http
        .put(target)
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(payload)
        .send()
        .await
        .map_err(map_reqwest_error)?;
    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if !(200..300).contains(&status) {
        return Err(Error::UnexpectedStatus {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_upload_url_fails_before_sending() {
        let http = reqwest::Client::new();
        let err = put_payload(&http, "storage/uploads/u1", "bytes", "video/mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }), "{err:?}");
    }
}
