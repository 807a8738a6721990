//! Product catalog queries and mutations

use shared::forms::ProductForm;
use shared::messages;
use shared::models::{Product, ProductDetailed};
use shared::types::QueryKey;
use shared::zero_stock::{screen, ZeroStockOutcome};

use super::ServiceContext;
use crate::error::ApiResult;

const LABEL: &str = "Producto";

pub struct ProductService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProductService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(QueryKey::Products.into(), || api.list_products())
            .await
    }

    pub async fn list_detailed(&self) -> ApiResult<Vec<ProductDetailed>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(QueryKey::DetailedProducts.into(), || {
                api.list_detailed_products()
            })
            .await
    }

    /// Detailed products split by whether they have stock in `storage_id`
    pub async fn available_in(&self, storage_id: &str) -> ApiResult<ZeroStockOutcome> {
        let rows = self.list_detailed().await?;
        let outcome = screen(rows, storage_id);
        if outcome.has_zero_stock_selected {
            tracing::debug!(storage_id, excluded = ?outcome.excluded, "products without stock");
        }
        Ok(outcome)
    }

    pub async fn get(&self, id: &str) -> ApiResult<Product> {
        let result = self.ctx.api.get_product(id).await;
        self.ctx.report(result)
    }

    pub async fn create(&self, form: &ProductForm) -> ApiResult<Product> {
        let result = self.ctx.api.create_product(form).await;
        let envelope = self.ctx.report(result)?;
        self.ctx.patch_upsert(QueryKey::Products, &envelope.data);
        self.ctx.invalidate(&[QueryKey::DetailedProducts]);
        self.ctx
            .toasts
            .success(envelope.message.unwrap_or_else(|| messages::created(LABEL)));
        Ok(envelope.data)
    }

    pub async fn update(&self, id: &str, form: &ProductForm) -> ApiResult<Product> {
        let result = self.ctx.api.update_product(id, form).await;
        let envelope = self.ctx.report(result)?;
        self.ctx.patch_upsert(QueryKey::Products, &envelope.data);
        self.ctx.invalidate(&[QueryKey::DetailedProducts]);
        self.ctx
            .toasts
            .success(envelope.message.unwrap_or_else(|| messages::updated(LABEL)));
        Ok(envelope.data)
    }

    pub async fn deactivate(&self, ids: &[String]) -> ApiResult<()> {
        let result = self.ctx.api.remove_products(ids).await;
        self.ctx.report(result)?;
        self.patch_active(ids, false);
        self.ctx.toasts.success(messages::deactivated(LABEL));
        Ok(())
    }

    pub async fn reactivate(&self, ids: &[String]) -> ApiResult<()> {
        let result = self.ctx.api.reactivate_products(ids).await;
        self.ctx.report(result)?;
        self.patch_active(ids, true);
        self.ctx.toasts.success(messages::reactivated(LABEL));
        Ok(())
    }

    fn patch_active(&self, ids: &[String], active: bool) {
        self.ctx.patch_active::<Product>(QueryKey::Products, ids, active);
        self.ctx
            .patch_active::<ProductDetailed>(QueryKey::DetailedProducts, ids, active);
    }
}
