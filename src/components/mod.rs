//! UI Components
//!
//! Leptos components for the tree and kanban views.

mod confirm_dialog;
mod inline_edit_input;
pub mod kanban_board;
mod kanban_card;
mod kanban_column;
mod log_panel;
mod prompt_dialog;
mod tab_bar;
mod tree_node_item;
mod tree_view;

pub use confirm_dialog::ConfirmDialog;
pub use inline_edit_input::{commit_edit, InlineEditInput};
pub use kanban_board::KanbanBoard;
pub use kanban_card::KanbanCardView;
pub use kanban_column::KanbanColumn;
pub use log_panel::LogPanel;
pub use prompt_dialog::PromptDialog;
pub use tab_bar::{Tab, TabBar};
pub use tree_node_item::TreeNodeItem;
pub use tree_view::TreeView;
