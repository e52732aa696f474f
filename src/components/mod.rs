//! UI Components
//!
//! Reusable Leptos components.

mod toolbar;
mod contact_table;
mod editable_cell;
mod contact_dialog;
mod context_menu;

pub use toolbar::Toolbar;
pub use contact_table::ContactTable;
pub use editable_cell::EditableCell;
pub use contact_dialog::ContactDialog;
pub use context_menu::ContextMenu;
