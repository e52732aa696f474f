//! Native dialogs: no-selection notices, delete and exit confirmations

use tauri::{command, AppHandle, Runtime, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use contact_store::Repository;

use crate::AppState;

/// Block on an OK/Cancel question; true on OK
fn ask<R: Runtime>(app: &AppHandle<R>, title: &str, message: &str) -> bool {
    app.dialog()
        .message(message)
        .title(title)
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancel)
        .blocking_show()
}

/// Tell the user an edit/delete needs a selected row
#[command]
pub async fn notify_no_selection<R: Runtime>(app: AppHandle<R>, action: String) -> Result<(), String> {
    app.dialog()
        .message(format!("Please select the contact you want to {}.", action))
        .title("No Contact Selected")
        .kind(MessageDialogKind::Info)
        .blocking_show();
    Ok(())
}

/// Confirm, then delete; returns whether the contact was deleted
#[command]
pub async fn confirm_delete_contact<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
    id: u32,
) -> Result<bool, String> {
    let Some(contact) = state.contacts.find_by_id(id).await.map_err(|e| e.to_string())? else {
        return Ok(false);
    };

    let message = format!(
        "Are you sure you want to delete the selected contact:\n{}",
        contact.display_name()
    );
    if !ask(&app, "Delete Contact", &message) {
        return Ok(false);
    }

    state.contacts.delete(id).await.map_err(|e| e.to_string())?;
    log::info!("deleted contact {}", id);
    Ok(true)
}

/// Confirm, save once more and quit; returns false if the user cancelled
#[command]
pub async fn confirm_exit<R: Runtime>(app: AppHandle<R>, state: State<'_, AppState>) -> Result<bool, String> {
    if !ask(&app, "Exit Confirmation", "Are you sure you want to exit?") {
        return Ok(false);
    }

    if let Err(e) = state.contacts.save().await {
        log::error!("final save failed: {}", e);
    }
    app.exit(0);
    Ok(true)
}
