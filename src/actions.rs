//! Toolbar / context menu actions
//!
//! Shared by the toolbar buttons and the row context menu.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{AppContext, DialogMode};
use crate::store::{store_selected_contact, AppStore, AppStateStoreFields};

pub fn add_contact(ctx: AppContext) {
    ctx.open_dialog(DialogMode::Add);
}

/// Open the edit dialog for the selected row, or explain why not
pub fn edit_selected(store: AppStore, ctx: AppContext) {
    match store_selected_contact(&store) {
        Some(contact) => ctx.open_dialog(DialogMode::Edit(contact)),
        None => spawn_local(async {
            let _ = commands::notify_no_selection("edit").await;
        }),
    }
}

/// Confirm and delete the selected row, or explain why not
pub fn delete_selected(store: AppStore, ctx: AppContext) {
    let Some(id) = store.selected().get_untracked() else {
        spawn_local(async {
            let _ = commands::notify_no_selection("delete").await;
        });
        return;
    };

    spawn_local(async move {
        match commands::confirm_delete_contact(id).await {
            Ok(true) => store.selected().set(None),
            Ok(false) => {}
            Err(e) => ctx.flash(format!("Delete failed: {}", e)),
        }
    });
}

/// Ask, then save and close the app
pub fn exit_app(ctx: AppContext) {
    spawn_local(async move {
        if let Err(e) = commands::confirm_exit().await {
            ctx.flash(format!("Exit failed: {}", e));
        }
    });
}
