//! Incoming and Outgoing endpoints

use async_trait::async_trait;
use serde_json::json;
use shared::forms::RecordPayload;
use shared::models::{Incoming, MovementRecord, Outgoing, RecordKind};
use shared::types::Envelope;

use super::{RecordMutations, TransferWrites};
use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    /// `GET /incoming` or `GET /outgoing`
    pub async fn list_records<R: MovementRecord>(&self) -> ApiResult<Vec<R>> {
        self.get_list(&format!("/{}", R::KIND.resource())).await
    }

    /// `GET /{kind}/detailed`
    pub async fn list_detailed_records<R: MovementRecord>(&self) -> ApiResult<Vec<R::Detailed>> {
        self.get_list(&format!("/{}/detailed", R::KIND.resource()))
            .await
    }

    pub async fn get_record<R: MovementRecord>(&self, id: &str) -> ApiResult<R::Detailed> {
        self.get_one(&format!("/{}/{}", R::KIND.resource(), id))
            .await
    }

    /// Create a record together with its movements
    pub async fn create_record<R: MovementRecord>(
        &self,
        payload: &RecordPayload,
    ) -> ApiResult<Envelope<R>> {
        self.post(R::KIND.create_path(), payload).await
    }

    /// Update a record; its movement list is replaced as a whole
    pub async fn update_record<R: MovementRecord>(
        &self,
        id: &str,
        payload: &RecordPayload,
    ) -> ApiResult<Envelope<R>> {
        self.patch(&format!("/{}/{}", R::KIND.resource(), id), payload)
            .await
    }
}

#[async_trait]
impl RecordMutations for ApiClient {
    async fn remove_records(&self, kind: RecordKind, ids: &[String]) -> ApiResult<()> {
        self.remove_all(kind.resource(), ids).await
    }

    async fn reactivate_records(&self, kind: RecordKind, ids: &[String]) -> ApiResult<()> {
        self.reactivate_all(kind.resource(), ids).await
    }
}

#[async_trait]
impl TransferWrites for ApiClient {
    async fn create_outgoing(&self, payload: &RecordPayload) -> ApiResult<Outgoing> {
        Ok(self.create_record::<Outgoing>(payload).await?.data)
    }

    async fn create_incoming(&self, payload: &RecordPayload) -> ApiResult<Incoming> {
        Ok(self.create_record::<Incoming>(payload).await?.data)
    }

    async fn link_transfer(&self, outgoing_id: &str, incoming_id: &str) -> ApiResult<Outgoing> {
        let envelope: Envelope<Outgoing> = self
            .patch(
                &format!("/outgoing/{}", outgoing_id),
                &json!({ "incomingId": incoming_id }),
            )
            .await?;
        Ok(envelope.data)
    }
}
