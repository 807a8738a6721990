//! Domain models for the inventory admin console

mod design_project;
mod movement;
mod product;
mod record;
mod role;
mod stock;

pub use design_project::*;
pub use movement::*;
pub use product::*;
pub use record::*;
pub use role::*;
pub use stock::*;

/// Rows the backend sends without `isActive` are live
fn default_true() -> bool {
    true
}

/// A record that is soft-deleted by toggling `isActive`
pub trait SoftDeletable {
    fn id(&self) -> &str;
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Flip `isActive` for every item whose id is in `ids`; returns how many changed
pub fn set_active_for<T: SoftDeletable>(items: &mut [T], ids: &[String], active: bool) -> usize {
    let mut changed = 0;
    for item in items.iter_mut() {
        if item.is_active() != active && ids.iter().any(|id| id == item.id()) {
            item.set_active(active);
            changed += 1;
        }
    }
    changed
}

/// Replace the item with the same id, or append it when absent
pub fn upsert_by_id<T: SoftDeletable>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

macro_rules! soft_deletable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SoftDeletable for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn is_active(&self) -> bool {
                    self.is_active
                }

                fn set_active(&mut self, active: bool) {
                    self.is_active = active;
                }
            }
        )+
    };
}

soft_deletable!(Incoming, Outgoing, Product, Role, DesignProject, Storage);
