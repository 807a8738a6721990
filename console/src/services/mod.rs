//! Query and mutation services for the inventory console
//!
//! Each service wraps the server actions of one resource: reads go through
//! the session's query cache, writes patch that cache on success, and every
//! outcome is reported as a toast.

pub mod cascade;
pub mod design_projects;
pub mod products;
pub mod records;
pub mod roles;
pub mod stock;
pub mod transfer;

pub use cascade::{CascadeItem, CascadeReport, StageOutcome, Toggle, TransferCascade};
pub use design_projects::DesignProjectService;
pub use products::ProductService;
pub use records::{IncomingService, OutgoingService, RecordService};
pub use roles::RoleService;
pub use stock::StockService;
pub use transfer::{TransferOutcome, TransferService};

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use shared::models::{set_active_for, upsert_by_id, SoftDeletable};
use shared::types::QueryKey;

use crate::cache::{CacheKey, QueryCache};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::notify::ToastLog;

/// Everything a service needs to serve one request
#[derive(Clone)]
pub struct ServiceContext {
    pub api: ApiClient,
    pub cache: Arc<QueryCache>,
    pub toasts: ToastLog,
    pub compensate_on_failure: bool,
}

impl ServiceContext {
    pub fn new(api: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self {
            api,
            cache,
            toasts: ToastLog::new(),
            compensate_on_failure: false,
        }
    }

    /// Raise an error toast for a failed call before handing it back
    pub(crate) fn report<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(err) = &result {
            self.toasts.api_error(err);
        }
        result
    }

    pub(crate) async fn cached<T, F, Fut>(&self, key: CacheKey, fetch: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let result = self.cache.get_or_fetch(key, fetch).await;
        self.report(result)
    }

    /// Flip `isActive` for `ids` in a cached list
    pub(crate) fn patch_active<T>(&self, query: QueryKey, ids: &[String], active: bool)
    where
        T: SoftDeletable + Serialize + DeserializeOwned,
    {
        self.cache.patch_list::<T, _>(query, |list| {
            set_active_for(list, ids, active);
        });
    }

    /// Insert or replace `item` in a cached list
    pub(crate) fn patch_upsert<T>(&self, query: QueryKey, item: &T)
    where
        T: SoftDeletable + Clone + Serialize + DeserializeOwned,
    {
        self.cache
            .patch_list::<T, _>(query, |list| upsert_by_id(list, item.clone()));
    }

    pub(crate) fn invalidate(&self, queries: &[QueryKey]) {
        for query in queries {
            self.cache.invalidate(*query);
        }
    }
}
