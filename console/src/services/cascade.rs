//! Transfer-consistency cascade
//!
//! Deactivating or reactivating a record that is half of a transference must
//! toggle the other half too, otherwise one side of the transfer stays
//! active. The cascade runs as a linear sequence:
//!
//! 1. partition the ids into plain and transference ids
//! 2. toggle every id on the entity the user acted on (primary)
//! 3. if that succeeded and transference ids exist, toggle them on the
//!    opposite entity (mirrored)
//! 4. if the mirrored toggle succeeded, invalidate the stock views and the
//!    opposite detailed list, since stock moved in two warehouses
//!
//! A primary failure stops the sequence. A mirrored failure can be
//! compensated by undoing the primary toggle for the transference ids.

use serde::{Deserialize, Serialize};
use shared::messages;
use shared::models::{MovementRecord, RecordKind};
use shared::types::QueryKey;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::RecordMutations;
use crate::cache::QueryCache;
use crate::error::ApiResult;
use crate::notify::ToastLog;

/// Direction of a soft-delete toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Deactivate,
    Reactivate,
}

impl Toggle {
    pub fn inverse(&self) -> Toggle {
        match self {
            Toggle::Deactivate => Toggle::Reactivate,
            Toggle::Reactivate => Toggle::Deactivate,
        }
    }

    /// Value of `isActive` once the toggle is applied
    pub fn active_after(&self) -> bool {
        matches!(self, Toggle::Reactivate)
    }

    fn done_message(&self, label: &str) -> String {
        match self {
            Toggle::Deactivate => messages::deactivated(label),
            Toggle::Reactivate => messages::reactivated(label),
        }
    }

    fn linked_message(&self, label: &str) -> String {
        match self {
            Toggle::Deactivate => messages::linked_deactivated(label),
            Toggle::Reactivate => messages::linked_reactivated(label),
        }
    }
}

/// A row selected in a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeItem {
    pub id: String,
    pub is_transference: bool,
    pub paired_id: Option<String>,
}

impl CascadeItem {
    pub fn plain(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_transference: false,
            paired_id: None,
        }
    }

    pub fn transference(id: impl Into<String>, paired_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            is_transference: true,
            paired_id,
        }
    }

    pub fn from_record<R: MovementRecord>(record: &R) -> Self {
        Self {
            id: record.id().to_string(),
            is_transference: record.is_transference(),
            paired_id: record.paired_id().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum StageOutcome {
    Succeeded,
    Failed(String),
    Skipped,
}

impl StageOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, StageOutcome::Succeeded)
    }

    fn from_result(result: &ApiResult<()>) -> Self {
        match result {
            Ok(()) => StageOutcome::Succeeded,
            Err(err) => StageOutcome::Failed(err.user_message()),
        }
    }
}

/// What a cascade run did, stage by stage
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub kind: RecordKind,
    pub toggle: Toggle,
    pub ids: Vec<String>,
    pub transference_ids: Vec<String>,
    pub primary: StageOutcome,
    pub mirrored: StageOutcome,
    pub compensation: StageOutcome,
    pub refetched: Vec<QueryKey>,
}

impl CascadeReport {
    fn new(kind: RecordKind, toggle: Toggle, ids: Vec<String>, transference_ids: Vec<String>) -> Self {
        Self {
            kind,
            toggle,
            ids,
            transference_ids,
            primary: StageOutcome::Skipped,
            mirrored: StageOutcome::Skipped,
            compensation: StageOutcome::Skipped,
            refetched: Vec::new(),
        }
    }

    /// Ids of the acted-on entity whose state actually changed
    pub fn applied_ids(&self) -> Vec<String> {
        if !self.primary.succeeded() {
            return Vec::new();
        }
        if self.compensation.succeeded() {
            return self
                .ids
                .iter()
                .filter(|id| !self.transference_ids.contains(id))
                .cloned()
                .collect();
        }
        self.ids.clone()
    }

    /// Both halves of every transference ended in the same state
    pub fn is_consistent(&self) -> bool {
        match (&self.primary, &self.mirrored) {
            (StageOutcome::Failed(_), _) => true,
            (_, StageOutcome::Failed(_)) => self.compensation.succeeded(),
            _ => true,
        }
    }
}

/// Runs the cascade against any `RecordMutations` implementation
pub struct TransferCascade<'a, M: RecordMutations + ?Sized> {
    api: &'a M,
    cache: &'a QueryCache,
    toasts: &'a ToastLog,
    compensate: bool,
}

impl<'a, M: RecordMutations + ?Sized> TransferCascade<'a, M> {
    pub fn new(api: &'a M, cache: &'a QueryCache, toasts: &'a ToastLog) -> Self {
        Self {
            api,
            cache,
            toasts,
            compensate: false,
        }
    }

    pub fn compensate_on_failure(mut self, compensate: bool) -> Self {
        self.compensate = compensate;
        self
    }

    pub async fn run(&self, kind: RecordKind, toggle: Toggle, items: &[CascadeItem]) -> CascadeReport {
        let cascade_id = Uuid::new_v4();
        let span = tracing::info_span!("transfer_cascade", %cascade_id, %kind, ?toggle);
        self.run_stages(kind, toggle, items).instrument(span).await
    }

    async fn run_stages(&self, kind: RecordKind, toggle: Toggle, items: &[CascadeItem]) -> CascadeReport {
        let (ids, transference_ids) = partition(items);
        let mut report = CascadeReport::new(kind, toggle, ids, transference_ids);

        if report.ids.is_empty() {
            tracing::debug!("nothing selected");
            return report;
        }

        for item in items.iter().filter(|item| item.is_transference) {
            match &item.paired_id {
                Some(paired) => tracing::debug!(id = %item.id, paired = %paired, "transference pair"),
                None => tracing::warn!(id = %item.id, "transference without a paired record"),
            }
        }

        let primary = self.apply(kind, toggle, &report.ids).await;
        report.primary = StageOutcome::from_result(&primary);
        if let Err(err) = primary {
            self.toasts.api_error(&err);
            return report;
        }
        self.toasts.success(toggle.done_message(kind.label()));

        if report.transference_ids.is_empty() {
            return report;
        }

        let opposite = kind.opposite();
        let mirrored = self.apply(opposite, toggle, &report.transference_ids).await;
        report.mirrored = StageOutcome::from_result(&mirrored);
        match mirrored {
            Ok(()) => {
                self.toasts.success(toggle.linked_message(opposite.label()));
                for query in [
                    QueryKey::ProductStockByStorage,
                    QueryKey::Stock,
                    opposite.detailed_key(),
                ] {
                    self.cache.invalidate(query);
                    report.refetched.push(query);
                }
            }
            Err(err) => {
                tracing::error!(error = %err, ids = ?report.transference_ids, "paired toggle failed");
                self.toasts.api_error(&err);
                if self.compensate {
                    report.compensation = self.roll_back(kind, toggle, &report.transference_ids).await;
                }
            }
        }

        report
    }

    async fn roll_back(&self, kind: RecordKind, toggle: Toggle, ids: &[String]) -> StageOutcome {
        let result = self.apply(kind, toggle.inverse(), ids).await;
        match &result {
            Ok(()) => self.toasts.warning(messages::rolled_back(kind.label())),
            Err(err) => {
                tracing::error!(error = %err, ?ids, "compensation failed, transference left half-applied");
                self.toasts.api_error(err);
            }
        }
        StageOutcome::from_result(&result)
    }

    async fn apply(&self, kind: RecordKind, toggle: Toggle, ids: &[String]) -> ApiResult<()> {
        tracing::info!(%kind, ?toggle, ?ids, "toggling records");
        match toggle {
            Toggle::Deactivate => self.api.remove_records(kind, ids).await,
            Toggle::Reactivate => self.api.reactivate_records(kind, ids).await,
        }
    }
}

/// All ids (first occurrence order, duplicates dropped) and the transference subset
fn partition(items: &[CascadeItem]) -> (Vec<String>, Vec<String>) {
    let mut ids: Vec<String> = Vec::with_capacity(items.len());
    let mut transference = Vec::new();
    for item in items {
        if ids.contains(&item.id) {
            continue;
        }
        ids.push(item.id.clone());
        if item.is_transference {
            transference.push(item.id.clone());
        }
    }
    (ids, transference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_keeps_order_and_dedups() {
        let items = vec![
            CascadeItem::transference("t1", Some("o1".into())),
            CascadeItem::plain("p1"),
            CascadeItem::plain("t1"),
        ];
        let (ids, transference) = partition(&items);
        assert_eq!(ids, vec!["t1", "p1"]);
        assert_eq!(transference, vec!["t1"]);
    }

    #[test]
    fn test_applied_ids_exclude_compensated() {
        let mut report = CascadeReport::new(
            RecordKind::Incoming,
            Toggle::Deactivate,
            vec!["t1".into(), "p1".into()],
            vec!["t1".into()],
        );
        report.primary = StageOutcome::Succeeded;
        report.mirrored = StageOutcome::Failed("x".into());
        assert_eq!(report.applied_ids(), vec!["t1", "p1"]);
        assert!(!report.is_consistent());

        report.compensation = StageOutcome::Succeeded;
        assert_eq!(report.applied_ids(), vec!["p1"]);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_toggle_inverse() {
        assert_eq!(Toggle::Deactivate.inverse(), Toggle::Reactivate);
        assert!(!Toggle::Deactivate.active_after());
        assert!(Toggle::Reactivate.active_after());
    }
}
