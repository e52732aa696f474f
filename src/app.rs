//! Contact Book Frontend App
//!
//! Toolbar, contacts table, dialogs and status line.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::context::AppContext;
use crate::store::{store_set_contacts, AppState, AppStateStoreFields};
use crate::components::{Toolbar, ContactTable, ContactDialog, ContextMenu};

#[component]
pub fn App() -> impl IntoView {
    // State
    let store = Store::new(AppState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (dialog, set_dialog) = signal(None);
    let (menu, set_menu) = signal::<Option<(i32, i32)>>(None);

    // Provide context to all children
    let ctx = AppContext::new((reload_trigger, set_reload_trigger), (dialog, set_dialog));
    provide_context(store);
    provide_context(ctx);

    // The backend pushes every store change; reload on each
    spawn_local(async move {
        commands::on_contacts_changed(move || ctx.reload()).await;
    });

    // Load contacts on mount and whenever the trigger changes
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading contacts, trigger={}", trigger).into());
        spawn_local(async move {
            match commands::list_contacts().await {
                Ok(loaded) => store_set_contacts(&store, loaded),
                Err(e) => ctx.flash(format!("Could not load contacts: {}", e)),
            }
            if let Ok(info) = commands::contacts_file().await {
                store.file_info().set(Some(info));
            }
        });
    });

    view! {
        <div class="app-layout" on:click=move |_| set_menu.set(None)>
            <Toolbar />

            <main class="main-content">
                <ContactTable set_menu=set_menu />
            </main>

            <ContextMenu menu=menu set_menu=set_menu />
            <ContactDialog />

            <footer class="status-line">
                <span class="contact-count">
                    {move || format!("{} contacts", store.contacts().read().len())}
                </span>
                <span class="contact-file">
                    {move || store.file_info().get().map(|info| info.path).unwrap_or_default()}
                </span>
                <span class="notice">{move || ctx.notice.get().unwrap_or_default()}</span>
            </footer>
        </div>
    }
}
