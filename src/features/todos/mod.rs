//! Todos module - the todo list and its persistence round-trip
//!
//! This module provides:
//! - The ordered todo list with pure add/toggle updates
//! - JSON encoding of the list for the storage slot
//! - A store that mirrors every change to storage in the background

pub mod codec;
pub mod data;
pub mod store;

// Re-export commonly used types
pub use data::TodoItem;
pub use store::{FailureKind, StoreError, TodoStore};
