//! Application State Stores
//!
//! Plain state structs wrapped in Leptos `reactive_stores` for
//! fine-grained reactivity. Command logic lives on the structs so it can be
//! exercised without a reactive runtime.

mod kanban_store;
mod tree_store;

pub use kanban_store::{initial_board, KanbanState, KanbanStateStoreFields};
pub use tree_store::{initial_tree, PendingLoad, ToggleOutcome, TreeState, TreeStateStoreFields};
