//! Zero-stock guard for Outgoing product selection
//!
//! A product whose stock at the origin warehouse is exactly zero cannot
//! leave it, so it is dropped from the committed selection and a warning is
//! raised instead.

use serde::{Deserialize, Serialize};

use crate::messages::ZERO_STOCK_SELECTED;
use crate::models::ProductDetailed;
use crate::selection::{Selectable, WorkingSet};

/// Result of screening a selection against one warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroStockOutcome {
    pub kept: Vec<ProductDetailed>,
    pub excluded: Vec<String>,
    pub has_zero_stock_selected: bool,
}

/// Ids of rows whose entry for `storage_id` reports exactly zero stock
pub fn zero_stock_ids(rows: &[ProductDetailed], storage_id: &str) -> Vec<String> {
    rows.iter()
        .filter(|row| {
            row.stock
                .iter()
                .filter(|entry| entry.storage_id == storage_id)
                .any(|entry| entry.stock == 0)
        })
        .map(|row| row.key().to_string())
        .collect()
}

/// Split `rows` into the ones that may be committed and the excluded ids
pub fn screen(rows: Vec<ProductDetailed>, storage_id: &str) -> ZeroStockOutcome {
    let excluded = zero_stock_ids(&rows, storage_id);
    let kept = rows
        .into_iter()
        .filter(|row| !excluded.iter().any(|id| id == row.key()))
        .collect();

    ZeroStockOutcome {
        kept,
        has_zero_stock_selected: !excluded.is_empty(),
        excluded,
    }
}

/// Stateful guard owned by the Outgoing product picker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroStockGuard {
    has_zero_stock_selected: bool,
}

impl ZeroStockGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_zero_stock_selected(&self) -> bool {
        self.has_zero_stock_selected
    }

    /// Warning text while the flag is set
    pub fn warning(&self) -> Option<&'static str> {
        self.has_zero_stock_selected.then_some(ZERO_STOCK_SELECTED)
    }

    /// Screen a picker selection before it is committed to the working set.
    /// The flag follows the latest selection: it clears as soon as a selection
    /// holds no zero-stock product.
    pub fn commit(&mut self, selection: Vec<ProductDetailed>, storage_id: &str) -> Vec<ProductDetailed> {
        let outcome = screen(selection, storage_id);
        self.has_zero_stock_selected = outcome.has_zero_stock_selected;
        outcome.kept
    }

    /// Re-screen an already staged set after the origin warehouse changed.
    /// Returns the set that should replace the Outgoing working set.
    pub fn revalidate(
        &mut self,
        staged: &WorkingSet<ProductDetailed>,
        storage_id: &str,
    ) -> WorkingSet<ProductDetailed> {
        let kept = self.commit(staged.items().to_vec(), storage_id);
        let mut set = WorkingSet::new();
        set.append(kept);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, StockEntry};
    use proptest::prelude::*;

    fn row(id: &str, stock: &[(&str, i64)]) -> ProductDetailed {
        ProductDetailed {
            product: Product {
                id: id.to_string(),
                name: format!("Producto {}", id),
                description: None,
                code: None,
                unit: None,
                is_active: true,
            },
            stock: stock
                .iter()
                .map(|(storage, qty)| StockEntry {
                    storage_id: storage.to_string(),
                    storage_name: None,
                    stock: *qty,
                })
                .collect(),
        }
    }

    #[test]
    fn test_zero_stock_at_active_storage_is_excluded() {
        let mut guard = ZeroStockGuard::new();
        let kept = guard.commit(
            vec![row("p", &[("S", 0), ("T", 9)]), row("q", &[("S", 4)])],
            "S",
        );

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key(), "q");
        assert!(guard.has_zero_stock_selected());
        assert!(guard.warning().is_some());
    }

    #[test]
    fn test_zero_stock_elsewhere_is_retained() {
        let mut guard = ZeroStockGuard::new();
        let kept = guard.commit(vec![row("p", &[("S", 0), ("T", 9)])], "T");

        assert_eq!(kept.len(), 1);
        assert!(!guard.has_zero_stock_selected());
        assert!(guard.warning().is_none());
    }

    #[test]
    fn test_missing_entry_is_retained() {
        let outcome = screen(vec![row("p", &[("T", 3)])], "S");
        assert_eq!(outcome.kept.len(), 1);
        assert!(outcome.excluded.is_empty());
    }

    #[test]
    fn test_flag_resets_on_clean_selection() {
        let mut guard = ZeroStockGuard::new();
        guard.commit(vec![row("p", &[("S", 0)])], "S");
        assert!(guard.has_zero_stock_selected());

        guard.commit(vec![row("q", &[("S", 1)])], "S");
        assert!(!guard.has_zero_stock_selected());
    }

    #[test]
    fn test_revalidate_after_storage_change() {
        let mut staged = WorkingSet::new();
        staged.append(vec![row("p", &[("S", 5), ("T", 0)]), row("q", &[("T", 2)])]);

        let mut guard = ZeroStockGuard::new();
        let replaced = guard.revalidate(&staged, "T");

        assert_eq!(replaced.ids(), vec!["q"]);
        assert!(guard.has_zero_stock_selected());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_only_zero_at_active_storage_excluded(
            stocks in prop::collection::vec((0i64..3, 0i64..3), 1..12)
        ) {
            let rows: Vec<ProductDetailed> = stocks
                .iter()
                .enumerate()
                .map(|(i, (s, t))| row(&i.to_string(), &[("S", *s), ("T", *t)]))
                .collect();

            let outcome = screen(rows, "S");

            for kept in &outcome.kept {
                prop_assert_ne!(kept.stock_at("S"), Some(0));
            }
            let expected_excluded = stocks.iter().filter(|(s, _)| *s == 0).count();
            prop_assert_eq!(outcome.excluded.len(), expected_excluded);
            prop_assert_eq!(outcome.has_zero_stock_selected, expected_excluded > 0);
            prop_assert_eq!(outcome.kept.len() + outcome.excluded.len(), stocks.len());
        }
    }
}
