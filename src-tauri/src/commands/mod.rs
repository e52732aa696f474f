//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod contact_cmd;
mod dialog_cmd;
mod log_cmd;

pub use contact_cmd::*;
pub use dialog_cmd::*;
pub use log_cmd::*;
