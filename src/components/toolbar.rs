//! Toolbar Component
//!
//! New / Edit / Delete / Exit buttons above the table.

use leptos::prelude::*;

use crate::actions;
use crate::context::AppContext;
use crate::store::use_app_store;

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    view! {
        <div class="toolbar">
            <button class="toolbar-btn" on:click=move |_| actions::add_contact(ctx)>"New..."</button>
            <button class="toolbar-btn" on:click=move |_| actions::edit_selected(store, ctx)>"Edit..."</button>
            <button class="toolbar-btn" on:click=move |_| actions::delete_selected(store, ctx)>"Delete"</button>
            <span class="toolbar-spacer"></span>
            <button class="toolbar-btn exit" on:click=move |_| actions::exit_app(ctx)>"Exit"</button>
        </div>
    }
}
