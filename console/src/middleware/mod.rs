//! Middleware for the console

pub mod session;

pub use session::*;
