//! Dialog Commands
//!
//! Native message boxes live in the backend; these just ask for them.

use wasm_bindgen::prelude::*;
use serde::Serialize;
use super::invoke;

#[derive(Serialize)]
struct ActionArgs<'a> {
    action: &'a str,
}

#[derive(Serialize)]
struct IdArgs {
    id: u32,
}

/// "Please select the contact you want to {action}."
pub async fn notify_no_selection(action: &str) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&ActionArgs { action }).map_err(|e| e.to_string())?;
    let _ = invoke("notify_no_selection", js_args).await;
    Ok(())
}

/// Returns true if the user confirmed and the contact is gone
pub async fn confirm_delete_contact(id: u32) -> Result<bool, String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    let result = invoke("confirm_delete_contact", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn confirm_exit() -> Result<bool, String> {
    let result = invoke("confirm_exit", JsValue::NULL).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
