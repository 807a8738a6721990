//! Common types used across the console

use serde::{Deserialize, Serialize};

/// Names of the cached queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKey {
    Incomes,
    DetailedIncomes,
    Outcomes,
    DetailedOutcomes,
    Products,
    DetailedProducts,
    Stock,
    ProductStockByStorage,
    ProductStock,
    Roles,
    Permissions,
    DesignProjects,
}

impl QueryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::Incomes => "incomes",
            QueryKey::DetailedIncomes => "detailed-incomes",
            QueryKey::Outcomes => "outcomes",
            QueryKey::DetailedOutcomes => "detailed-outcomes",
            QueryKey::Products => "products",
            QueryKey::DetailedProducts => "detailed-products",
            QueryKey::Stock => "stock",
            QueryKey::ProductStockByStorage => "product-stock-by-storage",
            QueryKey::ProductStock => "product-stock",
            QueryKey::Roles => "roles",
            QueryKey::Permissions => "permissions",
            QueryKey::DesignProjects => "design-projects",
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of the bulk remove/reactivate endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct IdsPayload {
    pub ids: Vec<String>,
}

impl IdsPayload {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Envelope returned by the mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}
