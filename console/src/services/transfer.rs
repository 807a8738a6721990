//! Stock transfers between warehouses
//!
//! A transfer is an Outgoing at the origin plus an Incoming at the
//! destination, both flagged `isTransference` and pointing at each other.

use serde::Serialize;
use shared::forms::TransferForm;
use shared::messages;
use shared::models::{Incoming, Outgoing, RecordKind};
use shared::types::QueryKey;

use super::records::STOCK_VIEWS;
use super::ServiceContext;
use crate::api::{RecordMutations, TransferWrites};
use crate::cache::QueryCache;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::notify::ToastLog;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub outgoing: Outgoing,
    pub incoming: Incoming,
    /// Whether the exit half was updated with its entry id
    pub linked: bool,
}

pub struct TransferService<'a, A: ?Sized> {
    api: &'a A,
    cache: &'a QueryCache,
    toasts: &'a ToastLog,
}

impl<'a> TransferService<'a, ApiClient> {
    pub fn from_context(ctx: &'a ServiceContext) -> Self {
        Self::new(&ctx.api, &ctx.cache, &ctx.toasts)
    }
}

impl<'a, A> TransferService<'a, A>
where
    A: TransferWrites + RecordMutations + ?Sized,
{
    pub fn new(api: &'a A, cache: &'a QueryCache, toasts: &'a ToastLog) -> Self {
        Self { api, cache, toasts }
    }

    /// Create both halves of a transfer. The form must already be validated.
    pub async fn create_transfer(&self, form: &TransferForm) -> ApiResult<TransferOutcome> {
        tracing::info!(
            origin = %form.origin_storage_id,
            destination = %form.destination_storage_id,
            movements = form.movements.len(),
            "creating transfer"
        );

        let mut outgoing = match self.api.create_outgoing(&form.outgoing_payload()).await {
            Ok(outgoing) => outgoing,
            Err(err) => {
                self.toasts.api_error(&err);
                return Err(err);
            }
        };

        let incoming = match self.api.create_incoming(&form.incoming_payload(&outgoing.id)).await {
            Ok(incoming) => incoming,
            Err(err) => {
                self.toasts.api_error(&err);
                self.discard_outgoing(&outgoing.id).await;
                return Err(err);
            }
        };

        let linked = match self.api.link_transfer(&outgoing.id, &incoming.id).await {
            Ok(updated) => {
                outgoing = updated;
                true
            }
            Err(err) => {
                tracing::warn!(outgoing = %outgoing.id, incoming = %incoming.id, error = %err, "transfer left unlinked");
                self.toasts.warning(messages::TRANSFER_LINK_FAILED);
                outgoing.incoming_id = Some(incoming.id.clone());
                false
            }
        };

        self.refresh_cache(&outgoing, &incoming);
        self.toasts.success(messages::TRANSFER_CREATED);

        Ok(TransferOutcome {
            outgoing,
            incoming,
            linked,
        })
    }

    /// Undo the exit half when the entry half could not be created
    async fn discard_outgoing(&self, outgoing_id: &str) {
        let ids = [outgoing_id.to_string()];
        match self.api.remove_records(RecordKind::Outgoing, &ids).await {
            Ok(()) => {
                tracing::info!(outgoing = %outgoing_id, "orphaned exit deactivated");
                self.toasts.warning(messages::rolled_back(RecordKind::Outgoing.label()));
                self.cache.invalidate(QueryKey::Outcomes);
            }
            Err(err) => {
                tracing::error!(outgoing = %outgoing_id, error = %err, "orphaned exit could not be deactivated");
                self.toasts.api_error(&err);
            }
        }
    }

    fn refresh_cache(&self, outgoing: &Outgoing, incoming: &Incoming) {
        self.cache.patch_list::<Outgoing, _>(QueryKey::Outcomes, |list| {
            shared::models::upsert_by_id(list, outgoing.clone())
        });
        self.cache.patch_list::<Incoming, _>(QueryKey::Incomes, |list| {
            shared::models::upsert_by_id(list, incoming.clone())
        });
        for query in [QueryKey::DetailedOutcomes, QueryKey::DetailedIncomes]
            .into_iter()
            .chain(STOCK_VIEWS)
        {
            self.cache.invalidate(query);
        }
    }
}
