//! Server actions: one module per backend resource
//!
//! These are thin wrappers over `ApiClient` that know the endpoint paths and
//! payload shapes. Caching, toasts and cross-entity choreography live in
//! `crate::services`.

pub mod design_projects;
pub mod products;
pub mod records;
pub mod roles;
pub mod stock;

use async_trait::async_trait;
use shared::forms::RecordPayload;
use shared::models::{Incoming, Outgoing, RecordKind};
use shared::types::IdsPayload;

use crate::error::ApiResult;
use crate::http::ApiClient;

/// Bulk soft-delete and reactivation of Incoming/Outgoing records
#[async_trait]
pub trait RecordMutations: Send + Sync {
    async fn remove_records(&self, kind: RecordKind, ids: &[String]) -> ApiResult<()>;

    async fn reactivate_records(&self, kind: RecordKind, ids: &[String]) -> ApiResult<()>;
}

/// The writes a transfer creation is made of
#[async_trait]
pub trait TransferWrites: Send + Sync {
    async fn create_outgoing(&self, payload: &RecordPayload) -> ApiResult<Outgoing>;

    async fn create_incoming(&self, payload: &RecordPayload) -> ApiResult<Incoming>;

    /// Point the exit half at its entry half
    async fn link_transfer(&self, outgoing_id: &str, incoming_id: &str) -> ApiResult<Outgoing>;
}

impl ApiClient {
    /// `PATCH /{resource}/remove/all`
    pub(crate) async fn remove_all(&self, resource: &str, ids: &[String]) -> ApiResult<()> {
        let message = self
            .patch_ack(&format!("/{}/remove/all", resource), &IdsPayload::new(ids.iter().cloned()))
            .await?;
        tracing::debug!(resource, count = ids.len(), ?message, "records deactivated");
        Ok(())
    }

    /// `PATCH /{resource}/reactivate/all`
    pub(crate) async fn reactivate_all(&self, resource: &str, ids: &[String]) -> ApiResult<()> {
        let message = self
            .patch_ack(
                &format!("/{}/reactivate/all", resource),
                &IdsPayload::new(ids.iter().cloned()),
            )
            .await?;
        tracing::debug!(resource, count = ids.len(), ?message, "records reactivated");
        Ok(())
    }
}
