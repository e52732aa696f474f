//! Editable Cell Component
//!
//! Double-click turns the cell into a text input. Enter or blur commits the
//! edit to the backend, Escape cancels.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::AppContext;

#[component]
pub fn EditableCell(
    contact_id: u32,
    field: &'static str,
    value: String,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(value.clone());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let original = value.clone();
    let commit = move || {
        if !editing.get_untracked() {
            return;
        }
        set_editing.set(false);
        let new_value = draft.get_untracked();
        if new_value == original {
            return;
        }
        spawn_local(async move {
            if let Err(e) = commands::edit_contact_field(contact_id, field, &new_value).await {
                ctx.flash(format!("Could not save {}: {}", field, e));
            }
        });
    };

    // Focus the input as soon as it appears
    Effect::new(move |_| {
        if editing.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let start_value = value.clone();
    view! {
        <td
            class="contact-cell"
            on:dblclick=move |_| {
                set_draft.set(start_value.clone());
                set_editing.set(true);
            }
        >
            {move || if editing.get() {
                let commit_key = commit.clone();
                let commit_blur = commit.clone();
                view! {
                    <input
                        type="text"
                        class="cell-input"
                        node_ref=input_ref
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            match ev.key().as_str() {
                                "Enter" => commit_key(),
                                "Escape" => set_editing.set(false),
                                _ => {}
                            }
                        }
                        on:blur=move |_| commit_blur()
                    />
                }.into_any()
            } else {
                view! { <span class="cell-text">{value.clone()}</span> }.into_any()
            }}
        </td>
    }
}
