use super::Response;
use crate::client::FastPix;
use crate::error::Result;
use crate::http::{ApiResponse, HttpMethod};
use crate::request::{Call, Operation, Server};
use crate::types::signing_keys::SigningKey;
use crate::types::{Acknowledgement, ListParams};

pub const CREATE_SIGNING_KEY: Operation = Operation::new(
    "create-signing-key",
    HttpMethod::Post,
    Server::Api,
    "/iam/signing-keys",
);
pub const LIST_SIGNING_KEYS: Operation = Operation::new(
    "list-signing-keys",
    HttpMethod::Get,
    Server::Api,
    "/iam/signing-keys",
);
pub const GET_SIGNING_KEY: Operation = Operation::new(
    "get-signing-key-by-id",
    HttpMethod::Get,
    Server::Api,
    "/iam/signing-keys/{signingKeyId}",
);
pub const DELETE_SIGNING_KEY: Operation = Operation::new(
    "delete-signing-key",
    HttpMethod::Delete,
    Server::Api,
    "/iam/signing-keys/{signingKeyId}",
);

#[derive(Debug, Clone, Copy)]
pub struct SigningKeyEndpoints<'a> {
    client: &'a FastPix,
}

impl<'a> SigningKeyEndpoints<'a> {
    pub(crate) fn new(client: &'a FastPix) -> Self {
        Self { client }
    }

    /// Generate a key pair. The private key is only returned here.
    pub async fn create(&self) -> Result<Response<SigningKey>> {
        self.client.execute(&CREATE_SIGNING_KEY, Call::new()).await
    }

    pub async fn list(&self, params: ListParams) -> Result<Response<Vec<SigningKey>>> {
        self.client
            .execute(&LIST_SIGNING_KEYS, params.apply(Call::new()))
            .await
    }

    pub async fn get(&self, signing_key_id: &str) -> Result<Response<SigningKey>> {
        let call = Call::new().path("signingKeyId", signing_key_id);
        self.client.execute(&GET_SIGNING_KEY, call).await
    }

    pub async fn delete(&self, signing_key_id: &str) -> Result<ApiResponse<Acknowledgement>> {
        let call = Call::new().path("signingKeyId", signing_key_id);
        self.client.execute(&DELETE_SIGNING_KEY, call).await
    }
}
