//! Warehouse and stock views

use serde::{Deserialize, Serialize};

/// A warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

/// Stock of a product at one warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub storage_id: String,
    pub storage_name: Option<String>,
    pub stock: i64,
}

/// Row of the per-warehouse product stock view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub product_id: String,
    pub product_name: Option<String>,
    pub storage_id: String,
    pub stock: i64,
}

/// Aggregate stock of one warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageStock {
    pub storage_id: String,
    pub storage_name: Option<String>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub products: Vec<ProductStock>,
}
