//! Contact Table Component
//!
//! One row per contact; click selects, right-click opens the context menu,
//! double-click on a cell edits it in place.

use leptos::prelude::*;

use crate::components::EditableCell;
use crate::models::{Contact, COLUMNS};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ContactTable(
    set_menu: WriteSignal<Option<(i32, i32)>>,
) -> impl IntoView {
    let store = use_app_store();

    view! {
        <table class="contacts-table">
            <thead>
                <tr>
                    {COLUMNS.iter().map(|(_, label)| view! { <th>{*label}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                // Keyed on the whole contact so edited rows re-render
                <For
                    each=move || store.contacts().get()
                    key=|contact| contact.clone()
                    children=move |contact| view! { <ContactRow contact=contact set_menu=set_menu /> }
                />
            </tbody>
        </table>
        <Show when=move || store.contacts().read().is_empty()>
            <p class="empty-table">"No contacts yet. Use \"New...\" to add one."</p>
        </Show>
    }
}

#[component]
fn ContactRow(
    contact: Contact,
    set_menu: WriteSignal<Option<(i32, i32)>>,
) -> impl IntoView {
    let store = use_app_store();
    let id = contact.id;
    let is_selected = move || store.selected().get() == Some(id);

    view! {
        <tr
            class=move || if is_selected() { "contact-row selected" } else { "contact-row" }
            on:click=move |_| store.selected().set(Some(id))
            on:contextmenu=move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                store.selected().set(Some(id));
                set_menu.set(Some((ev.client_x(), ev.client_y())));
            }
        >
            {COLUMNS.iter().map(|(key, _)| {
                view! { <EditableCell contact_id=id field=*key value=contact.field(key) /> }
            }).collect_view()}
        </tr>
    }
}
