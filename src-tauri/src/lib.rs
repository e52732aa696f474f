//! Contact Book Backend
//!
//! Layered architecture:
//! - contact_store (crate): domain entities, XML persistence, observable store
//! - commands: Tauri command handlers
//!
//! The store lives in managed state behind an async mutex; every change it
//! publishes is forwarded to the webview as a `contacts-changed` event.

use tauri::{Emitter, Manager};

use contact_store::{ContactRepository, ContactStore, StoreConfig};

mod commands;

/// Event name the frontend listens on to refresh the table
pub const CONTACTS_CHANGED: &str = "contacts-changed";

/// Application state shared across commands
pub struct AppState {
    pub contacts: ContactRepository,
    pub config: StoreConfig,
}

/// Load the contacts file and wire store events to the webview
fn init_store<R: tauri::Runtime>(app_handle: &tauri::AppHandle<R>, config: StoreConfig) -> ContactStore {
    let mut store = ContactStore::new(config);
    let report = store.load();
    match &report.error {
        None => {
            let _ = rolling_logger::info(&format!("Loaded {} contacts", report.loaded));
        }
        Some(e) if e.is_not_found_file() => {
            let _ = rolling_logger::info("No contacts file yet, starting empty");
        }
        Some(e) => {
            let _ = rolling_logger::error(&format!(
                "Contacts file only partially loaded ({} contacts): {}",
                report.loaded, e
            ));
        }
    }

    let emitter = app_handle.clone();
    store.subscribe(move |event| {
        if let Err(e) = emitter.emit(CONTACTS_CHANGED, event) {
            log::warn!("failed to emit {}: {}", CONTACTS_CHANGED, e);
        }
    });
    store
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            // Single instance check - must be first! One writer per contacts file.
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            let log_dir = app_handle.path().app_log_dir()?;
            if let Err(e) = rolling_logger::init_logger(log_dir, "ContactBook") {
                eprintln!("[{}] Logger init failed: {}", chrono::Local::now().format("%H:%M:%S%.3f"), e);
            }

            let config = StoreConfig::from_env();
            log::info!(
                "using contacts file {} ({} placeholders)",
                config.path.display(),
                config.placeholder
            );

            let store = init_store(&app_handle, config.clone());
            app.manage(AppState {
                contacts: ContactRepository::from_store(store),
                config,
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Contact CRUD
            commands::list_contacts,
            commands::get_contact,
            commands::add_contact,
            commands::update_contact,
            commands::edit_contact_field,
            commands::delete_contact,
            commands::save_contacts,
            // Dialogs
            commands::notify_no_selection,
            commands::confirm_delete_contact,
            commands::confirm_exit,
            // Logs
            commands::recent_log_lines,
            commands::contacts_file,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
