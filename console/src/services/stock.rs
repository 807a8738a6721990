//! Stock views

use shared::models::{ProductStock, StockEntry, StorageStock};
use shared::types::QueryKey;

use super::ServiceContext;
use crate::cache::CacheKey;
use crate::error::ApiResult;

pub struct StockService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StockService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Aggregate stock per warehouse
    pub async fn storages(&self) -> ApiResult<Vec<StorageStock>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(QueryKey::Stock.into(), || api.storages_stock())
            .await
    }

    pub async fn by_storage(&self, storage_id: &str) -> ApiResult<Vec<ProductStock>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(
                CacheKey::with_param(QueryKey::ProductStockByStorage, storage_id),
                || api.storage_stock(storage_id),
            )
            .await
    }

    pub async fn by_product(&self, product_id: &str) -> ApiResult<Vec<StockEntry>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(
                CacheKey::with_param(QueryKey::ProductStock, product_id),
                || api.product_stock(product_id),
            )
            .await
    }

    pub async fn for_product_in_storage(
        &self,
        storage_id: &str,
        product_id: &str,
    ) -> ApiResult<ProductStock> {
        let result = self
            .ctx
            .api
            .product_stock_in_storage(storage_id, product_id)
            .await;
        self.ctx.report(result)
    }
}
