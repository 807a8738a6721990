//! Product catalog models

use serde::{Deserialize, Serialize};

use super::StockEntry;

/// A catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub unit: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

/// A product with its stock in every warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailed {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default)]
    pub stock: Vec<StockEntry>,
}

impl ProductDetailed {
    /// Stock held at one warehouse, if the product has an entry there
    pub fn stock_at(&self, storage_id: &str) -> Option<i64> {
        self.stock
            .iter()
            .filter(|entry| entry.storage_id == storage_id)
            .map(|entry| entry.stock)
            .reduce(|a, b| a + b)
    }

    /// Stock summed across all warehouses
    pub fn total_stock(&self) -> i64 {
        self.stock.iter().map(|entry| entry.stock).sum()
    }
}

impl super::SoftDeletable for ProductDetailed {
    fn id(&self) -> &str {
        &self.product.id
    }

    fn is_active(&self) -> bool {
        self.product.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.product.is_active = active;
    }
}
