//! Selected-products working sets
//!
//! While a create/edit dialog is open the user stages products into a
//! movement list. Incoming and Outgoing each keep their own working set; the
//! owner is the dialog (or the WASM host), never the query cache.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::MovementForm;
use crate::models::{Product, ProductDetailed};

/// Something that can be staged by id
pub trait Selectable {
    fn key(&self) -> &str;
    fn label(&self) -> &str;
}

impl Selectable for Product {
    fn key(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Selectable for ProductDetailed {
    fn key(&self) -> &str {
        &self.product.id
    }

    fn label(&self) -> &str {
        &self.product.name
    }
}

/// Deduplicated, insertion-ordered list of staged products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingSet<T> {
    items: Vec<T>,
}

impl<T> Default for WorkingSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Selectable> WorkingSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.key() == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(Selectable::key).collect()
    }

    /// Append products not already present; the first inserted copy of an id wins.
    /// Returns how many were added.
    pub fn append<I: IntoIterator<Item = T>>(&mut self, products: I) -> usize {
        let before = self.items.len();
        for product in products {
            if !self.contains(product.key()) {
                self.items.push(product);
            }
        }
        self.items.len() - before
    }

    /// Drop the entry with `id`; a missing id is a no-op
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.key() != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Wholesale substitution, still deduplicated
    pub fn replace<I: IntoIterator<Item = T>>(&mut self, products: I) {
        self.items.clear();
        self.append(products);
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Reducer actions dispatched by the dialogs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum SelectionAction<T> {
    Append(Vec<T>),
    Remove(String),
    Clear,
    Replace(Vec<T>),
}

/// The two independent working sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Incoming,
    Outgoing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("the {0:?} working set does not support replace")]
    ReplaceNotSupported(Feature),
}

/// Apply one action to a working set
pub fn reduce<T: Selectable>(set: &mut WorkingSet<T>, action: SelectionAction<T>) {
    match action {
        SelectionAction::Append(products) => {
            set.append(products);
        }
        SelectionAction::Remove(id) => {
            set.remove(&id);
        }
        SelectionAction::Clear => set.clear(),
        SelectionAction::Replace(products) => set.replace(products),
    }
}

/// Working sets for both movement dialogs.
///
/// Incoming stages catalog products; Outgoing stages stock-bearing rows so the
/// zero-stock guard can inspect them. Only Outgoing accepts `Replace`, used
/// after the origin warehouse changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSelections {
    pub incoming: WorkingSet<Product>,
    pub outgoing: WorkingSet<ProductDetailed>,
}

impl ProductSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch_incoming(
        &mut self,
        action: SelectionAction<Product>,
    ) -> Result<(), SelectionError> {
        if matches!(action, SelectionAction::Replace(_)) {
            return Err(SelectionError::ReplaceNotSupported(Feature::Incoming));
        }
        reduce(&mut self.incoming, action);
        Ok(())
    }

    pub fn dispatch_outgoing(&mut self, action: SelectionAction<ProductDetailed>) {
        reduce(&mut self.outgoing, action);
    }

    /// Dialog closed or form submitted successfully
    pub fn close(&mut self, feature: Feature) {
        match feature {
            Feature::Incoming => self.incoming.clear(),
            Feature::Outgoing => self.outgoing.clear(),
        }
    }
}

/// A movement field-array row, labelled for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRow {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub buying_price: Option<Decimal>,
}

impl From<MovementRow> for MovementForm {
    fn from(row: MovementRow) -> Self {
        MovementForm {
            product_id: row.product_id,
            quantity: row.quantity,
            buying_price: row.buying_price,
            date: None,
        }
    }
}

/// Rebuild the field array from the working set.
///
/// This is a full rebuild: rows are recreated with default values, so any
/// quantity or price typed into a row is discarded.
pub fn rebuild_movement_rows<T: Selectable>(set: &WorkingSet<T>) -> Vec<MovementRow> {
    set.items()
        .iter()
        .map(|item| MovementRow {
            product_id: item.key().to_string(),
            product_name: item.label().to_string(),
            quantity: 1,
            buying_price: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            code: None,
            unit: None,
            is_active: true,
        }
    }

    fn detailed(id: &str) -> ProductDetailed {
        ProductDetailed {
            product: product(id, id),
            stock: vec![],
        }
    }

    #[test]
    fn test_append_keeps_first_copy() {
        let mut set = WorkingSet::new();
        set.append(vec![product("a", "Tornillo"), product("b", "Tuerca")]);
        let added = set.append(vec![product("a", "Tornillo renombrado"), product("c", "Arandela")]);

        assert_eq!(added, 1);
        assert_eq!(set.ids(), vec!["a", "b", "c"]);
        assert_eq!(set.items()[0].name, "Tornillo");
    }

    #[test]
    fn test_append_dedups_within_batch() {
        let mut set = WorkingSet::new();
        set.append(vec![product("a", "first"), product("a", "second")]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.items()[0].name, "first");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut set = WorkingSet::new();
        set.append(vec![product("a", "A")]);
        assert!(!set.remove("zzz"));
        assert_eq!(set.ids(), vec!["a"]);
    }

    #[test]
    fn test_incoming_rejects_replace() {
        let mut selections = ProductSelections::new();
        let result = selections.dispatch_incoming(SelectionAction::Replace(vec![product("a", "A")]));
        assert_eq!(result, Err(SelectionError::ReplaceNotSupported(Feature::Incoming)));
        assert!(selections.incoming.is_empty());
    }

    #[test]
    fn test_outgoing_replace_and_close() {
        let mut selections = ProductSelections::new();
        selections.dispatch_outgoing(SelectionAction::Append(vec![detailed("a"), detailed("b")]));
        selections.dispatch_outgoing(SelectionAction::Replace(vec![detailed("c")]));
        assert_eq!(selections.outgoing.ids(), vec!["c"]);

        selections
            .dispatch_incoming(SelectionAction::Append(vec![product("x", "X")]))
            .unwrap();
        selections.close(Feature::Outgoing);
        assert!(selections.outgoing.is_empty());
        assert_eq!(selections.incoming.len(), 1);
    }

    #[test]
    fn test_action_wire_format() {
        let action: SelectionAction<Product> =
            serde_json::from_str(r#"{"type": "remove", "payload": "a"}"#).unwrap();
        assert_eq!(action, SelectionAction::Remove("a".into()));

        let clear: SelectionAction<Product> = serde_json::from_str(r#"{"type": "clear"}"#).unwrap();
        assert_eq!(clear, SelectionAction::Clear);
    }

    #[test]
    fn test_rebuild_discards_row_edits() {
        let mut set = WorkingSet::new();
        set.append(vec![product("a", "Tornillo")]);
        let mut rows = rebuild_movement_rows(&set);
        rows[0].quantity = 25;

        set.append(vec![product("b", "Tuerca")]);
        let rows = rebuild_movement_rows(&set);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quantity, 1);
        assert_eq!(rows[1].product_name, "Tuerca");
    }

    fn id_strategy() -> impl Strategy<Value = String> {
        prop_oneof![Just("a"), Just("b"), Just("c"), Just("d"), Just("e")].prop_map(String::from)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Each id appears at most once and keeps the first inserted copy
        #[test]
        fn prop_append_dedup(
            batches in prop::collection::vec(prop::collection::vec((id_strategy(), 0u32..1000), 0..6), 0..8)
        ) {
            let mut set = WorkingSet::new();
            let mut first_seen: Vec<(String, String)> = Vec::new();

            for batch in batches {
                let products: Vec<Product> = batch
                    .iter()
                    .map(|(id, tag)| product(id, &tag.to_string()))
                    .collect();
                for p in &products {
                    if !first_seen.iter().any(|(id, _)| id == &p.id) {
                        first_seen.push((p.id.clone(), p.name.clone()));
                    }
                }
                set.append(products);
            }

            let ids = set.ids();
            for id in &ids {
                prop_assert_eq!(ids.iter().filter(|x| *x == id).count(), 1);
            }
            let stored: Vec<(String, String)> = set
                .items()
                .iter()
                .map(|p| (p.id.clone(), p.name.clone()))
                .collect();
            prop_assert_eq!(stored, first_seen);
        }

        /// Remove excludes the id and preserves the relative order of the rest
        #[test]
        fn prop_remove_preserves_order(
            ids in prop::collection::vec(id_strategy(), 0..10),
            target in id_strategy()
        ) {
            let mut set = WorkingSet::new();
            set.append(ids.iter().map(|id| product(id, id)));
            let expected: Vec<String> = set
                .ids()
                .into_iter()
                .filter(|id| *id != target)
                .map(String::from)
                .collect();

            set.remove(&target);

            let remaining: Vec<String> = set.ids().into_iter().map(String::from).collect();
            prop_assert_eq!(remaining, expected);
            prop_assert!(!set.contains(&target));
        }
    }
}
