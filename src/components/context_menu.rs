//! Context Menu Component
//!
//! Right-click menu on a table row.

use leptos::prelude::*;

use crate::actions;
use crate::context::AppContext;
use crate::store::use_app_store;

#[component]
pub fn ContextMenu(
    menu: ReadSignal<Option<(i32, i32)>>,
    set_menu: WriteSignal<Option<(i32, i32)>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    move || menu.get().map(|(x, y)| view! {
        <ul class="context-menu" style=format!("left: {}px; top: {}px;", x, y)>
            <li on:click=move |ev| {
                ev.stop_propagation();
                set_menu.set(None);
                actions::delete_selected(store, ctx);
            }>
                "delete"
            </li>
        </ul>
    })
}
