//! Shared types and logic for the inventory admin console
//!
//! This crate contains the models, form schemas and client-side state
//! reducers used by both the console server and the browser (via WASM).

pub mod forms;
pub mod messages;
pub mod models;
pub mod selection;
pub mod types;
pub mod validation;
pub mod zero_stock;

pub use forms::*;
pub use models::*;
pub use selection::*;
pub use types::*;
pub use zero_stock::*;
