//! Contact Commands
//!
//! Frontend bindings for contact-related backend commands.

use wasm_bindgen::prelude::*;
use serde::Serialize;
use crate::models::{Contact, ContactDraft, ContactsFileInfo};
use super::invoke;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct AddContactArgs<'a> {
    contact: &'a ContactDraft,
}

#[derive(Serialize)]
struct UpdateContactArgs<'a> {
    contact: &'a Contact,
}

#[derive(Serialize)]
struct EditFieldArgs<'a> {
    id: u32,
    field: &'a str,
    value: &'a str,
}

// ========================
// Commands
// ========================

pub async fn list_contacts() -> Result<Vec<Contact>, String> {
    let result = invoke("list_contacts", JsValue::NULL).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn add_contact(draft: &ContactDraft) -> Result<Contact, String> {
    let js_args = serde_wasm_bindgen::to_value(&AddContactArgs { contact: draft }).map_err(|e| e.to_string())?;
    let result = invoke("add_contact", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn update_contact(contact: &Contact) -> Result<Contact, String> {
    let js_args = serde_wasm_bindgen::to_value(&UpdateContactArgs { contact }).map_err(|e| e.to_string())?;
    let result = invoke("update_contact", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Commit an in-place cell edit
pub async fn edit_contact_field(id: u32, field: &str, value: &str) -> Result<Contact, String> {
    let js_args = serde_wasm_bindgen::to_value(&EditFieldArgs { id, field, value }).map_err(|e| e.to_string())?;
    let result = invoke("edit_contact_field", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn contacts_file() -> Result<ContactsFileInfo, String> {
    let result = invoke("contacts_file", JsValue::NULL).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
