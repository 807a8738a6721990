//! Incoming and Outgoing queries and mutations

use std::marker::PhantomData;

use shared::forms::{RecordForm, RecordPayload};
use shared::messages;
use shared::models::{Incoming, MovementRecord, Outgoing};
use shared::types::QueryKey;

use super::cascade::{CascadeItem, CascadeReport, Toggle, TransferCascade};
use super::ServiceContext;
use crate::cache::CacheKey;
use crate::error::ApiResult;

/// Views that change whenever stock enters or leaves a warehouse
pub(crate) const STOCK_VIEWS: [QueryKey; 3] = [
    QueryKey::Stock,
    QueryKey::ProductStockByStorage,
    QueryKey::DetailedProducts,
];

pub struct RecordService<'a, R> {
    ctx: &'a ServiceContext,
    _record: PhantomData<R>,
}

pub type IncomingService<'a> = RecordService<'a, Incoming>;
pub type OutgoingService<'a> = RecordService<'a, Outgoing>;

impl<'a, R: MovementRecord> RecordService<'a, R> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            _record: PhantomData,
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<R>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(R::KIND.list_key().into(), || api.list_records::<R>())
            .await
    }

    pub async fn list_detailed(&self) -> ApiResult<Vec<R::Detailed>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(R::KIND.detailed_key().into(), || {
                api.list_detailed_records::<R>()
            })
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<R::Detailed> {
        let result = self.ctx.api.get_record::<R>(id).await;
        self.ctx.report(result)
    }

    pub async fn create(&self, form: RecordForm) -> ApiResult<R> {
        let result = self
            .ctx
            .api
            .create_record::<R>(&RecordPayload::from(form))
            .await;
        let envelope = self.ctx.report(result)?;

        self.ctx.patch_upsert(R::KIND.list_key(), &envelope.data);
        self.ctx.invalidate(&[R::KIND.detailed_key()]);
        self.ctx.invalidate(&STOCK_VIEWS);
        self.ctx.toasts.success(
            envelope
                .message
                .unwrap_or_else(|| messages::created(R::KIND.label())),
        );
        tracing::info!(kind = %R::KIND, id = envelope.data.id(), "record created");
        Ok(envelope.data)
    }

    pub async fn update(&self, id: &str, form: RecordForm) -> ApiResult<R> {
        let result = self
            .ctx
            .api
            .update_record::<R>(id, &RecordPayload::from(form))
            .await;
        let envelope = self.ctx.report(result)?;

        self.ctx.patch_upsert(R::KIND.list_key(), &envelope.data);
        self.ctx.invalidate(&[R::KIND.detailed_key()]);
        self.ctx.invalidate(&STOCK_VIEWS);
        self.ctx.toasts.success(
            envelope
                .message
                .unwrap_or_else(|| messages::updated(R::KIND.label())),
        );
        Ok(envelope.data)
    }

    /// Soft-delete `ids`, cascading to the paired half of any transference
    pub async fn deactivate(&self, ids: &[String]) -> ApiResult<CascadeReport> {
        self.toggle(Toggle::Deactivate, ids).await
    }

    pub async fn reactivate(&self, ids: &[String]) -> ApiResult<CascadeReport> {
        self.toggle(Toggle::Reactivate, ids).await
    }

    async fn toggle(&self, toggle: Toggle, ids: &[String]) -> ApiResult<CascadeReport> {
        let items = self.resolve(ids).await?;
        let report = TransferCascade::new(&self.ctx.api, &self.ctx.cache, &self.ctx.toasts)
            .compensate_on_failure(self.ctx.compensate_on_failure)
            .run(R::KIND, toggle, &items)
            .await;

        let applied = report.applied_ids();
        if !applied.is_empty() {
            let active = toggle.active_after();
            self.ctx.patch_active::<R>(R::KIND.list_key(), &applied, active);
            self.ctx
                .patch_active::<R::Detailed>(R::KIND.detailed_key(), &applied, active);
        }
        Ok(report)
    }

    /// Look the selected ids up in the record list so the cascade knows
    /// which of them are transferences. The list is refetched once when the
    /// cached copy misses an id.
    async fn resolve(&self, ids: &[String]) -> ApiResult<Vec<CascadeItem>> {
        let key = CacheKey::from(R::KIND.list_key());
        let mut records: Vec<R> = self.ctx.cache.get(&key).unwrap_or_default();

        let missing = ids
            .iter()
            .any(|id| !records.iter().any(|record| record.id() == id));
        if missing {
            let fetched = self.ctx.api.list_records::<R>().await;
            records = self.ctx.report(fetched)?;
            self.ctx.cache.set(key, &records);
        }

        Ok(ids
            .iter()
            .map(|id| {
                records
                    .iter()
                    .find(|record| record.id() == id)
                    .map(CascadeItem::from_record)
                    .unwrap_or_else(|| {
                        tracing::warn!(kind = %R::KIND, %id, "selected record not found, treating as plain");
                        CascadeItem::plain(id.clone())
                    })
            })
            .collect())
    }
}
