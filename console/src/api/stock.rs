//! Stock views

use shared::models::{ProductStock, StockEntry, StorageStock};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    /// Stock of one product in every warehouse
    pub async fn product_stock(&self, product_id: &str) -> ApiResult<Vec<StockEntry>> {
        self.get_list(&format!("/stock/product/{}", product_id))
            .await
    }

    /// Aggregate stock of every warehouse
    pub async fn storages_stock(&self) -> ApiResult<Vec<StorageStock>> {
        self.get_list("/stock/storages").await
    }

    /// Products held by one warehouse
    pub async fn storage_stock(&self, storage_id: &str) -> ApiResult<Vec<ProductStock>> {
        self.get_list(&format!("/stock/storage/{}", storage_id))
            .await
    }

    pub async fn product_stock_in_storage(
        &self,
        storage_id: &str,
        product_id: &str,
    ) -> ApiResult<ProductStock> {
        self.get_one(&format!(
            "/stock/storage/{}/product/{}",
            storage_id, product_id
        ))
        .await
    }
}
