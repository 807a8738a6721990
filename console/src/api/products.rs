//! Product catalog endpoints

use shared::forms::ProductForm;
use shared::models::{Product, ProductDetailed};
use shared::types::Envelope;

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.get_list("/product").await
    }

    /// Products with their per-warehouse stock
    pub async fn list_detailed_products(&self) -> ApiResult<Vec<ProductDetailed>> {
        self.get_list("/product/detailed").await
    }

    pub async fn get_product(&self, id: &str) -> ApiResult<Product> {
        self.get_one(&format!("/product/{}", id)).await
    }

    pub async fn create_product(&self, form: &ProductForm) -> ApiResult<Envelope<Product>> {
        self.post("/product", form).await
    }

    pub async fn update_product(&self, id: &str, form: &ProductForm) -> ApiResult<Envelope<Product>> {
        self.patch(&format!("/product/{}", id), form).await
    }

    pub async fn remove_products(&self, ids: &[String]) -> ApiResult<()> {
        self.remove_all("product", ids).await
    }

    pub async fn reactivate_products(&self, ids: &[String]) -> ApiResult<()> {
        self.reactivate_all("product", ids).await
    }
}
