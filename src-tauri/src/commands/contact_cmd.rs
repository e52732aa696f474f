//! Tauri Commands for Contact CRUD
//!
//! Exposes contact operations to the frontend via Tauri IPC. Every mutating
//! command rewrites the contacts file before returning.

use serde::Serialize;
use tauri::State;

use contact_store::{Contact, ContactDraft, ContactField, Repository};

use crate::AppState;

/// List all contacts in table order
#[tauri::command]
pub async fn list_contacts(state: State<'_, AppState>) -> Result<Vec<Contact>, String> {
    state.contacts.list().await.map_err(|e| e.to_string())
}

/// Get contact by ID
#[tauri::command]
pub async fn get_contact(state: State<'_, AppState>, id: u32) -> Result<Option<Contact>, String> {
    state.contacts.find_by_id(id).await.map_err(|e| e.to_string())
}

/// Append a new contact from the add dialog
#[tauri::command]
pub async fn add_contact(state: State<'_, AppState>, contact: ContactDraft) -> Result<Contact, String> {
    let created = state.contacts.add(contact).await.map_err(|e| e.to_string())?;
    log::info!("added contact {}", created.id);
    Ok(created)
}

/// Replace all fields of a contact from the edit dialog
#[tauri::command]
pub async fn update_contact(state: State<'_, AppState>, contact: Contact) -> Result<Contact, String> {
    state.contacts.update(&contact).await.map_err(|e| e.to_string())
}

/// Commit an in-place cell edit
#[tauri::command]
pub async fn edit_contact_field(
    state: State<'_, AppState>,
    id: u32,
    field: String,
    value: String,
) -> Result<Contact, String> {
    let field: ContactField = field.parse().map_err(|e: contact_store::DomainError| e.to_string())?;
    state
        .contacts
        .set_field(id, field, value)
        .await
        .map_err(|e| e.to_string())
}

/// Delete without confirmation; absent IDs are a no-op
#[tauri::command]
pub async fn delete_contact(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.contacts.delete(id).await.map_err(|e| e.to_string())
}

/// Force a full save
#[tauri::command]
pub async fn save_contacts(state: State<'_, AppState>) -> Result<(), String> {
    state.contacts.save().await.map_err(|e| e.to_string())
}

/// Where the contacts live, for the status line
#[derive(Debug, Serialize)]
pub struct ContactsFileInfo {
    pub path: String,
    pub placeholder: String,
    pub count: usize,
}

#[tauri::command]
pub async fn contacts_file(state: State<'_, AppState>) -> Result<ContactsFileInfo, String> {
    let count = state.contacts.list().await.map_err(|e| e.to_string())?.len();
    Ok(ContactsFileInfo {
        path: state.config.path.display().to_string(),
        placeholder: state.config.placeholder.to_string(),
        count,
    })
}
