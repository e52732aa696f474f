//! Contact Dialog Component
//!
//! Modal form used for both "Add New Contact" and "Edit Contact".

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{AppContext, DialogMode};
use crate::models::{ContactDraft, COLUMNS};

/// Renders nothing unless a dialog is open
#[component]
pub fn ContactDialog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    move || ctx.dialog.get().map(|mode| view! { <ContactForm mode=mode /> })
}

#[component]
fn ContactForm(mode: DialogMode) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let draft = RwSignal::new(mode.draft());
    let title = mode.title();
    let header = mode.header();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let submitted: ContactDraft = draft.get_untracked();
        let mode = mode.clone();
        spawn_local(async move {
            let result = match mode {
                DialogMode::Add => commands::add_contact(&submitted).await.map(|_| ()),
                DialogMode::Edit(contact) => {
                    commands::update_contact(&contact.with_draft(submitted)).await.map(|_| ())
                }
            };
            if let Err(e) = result {
                ctx.flash(format!("Could not save contact: {}", e));
            }
            ctx.close_dialog();
        });
    };

    view! {
        <div class="dialog-backdrop">
            <form class="contact-dialog" on:submit=on_submit>
                <h2 class="dialog-title">{title}</h2>
                <p class="dialog-header">{header}</p>
                {COLUMNS.iter().map(|(key, label)| {
                    let key = *key;
                    view! {
                        <label class="dialog-field">
                            <span>{*label}</span>
                            {if key == "notes" {
                                view! {
                                    <textarea
                                        prop:value=move || draft.with(|d| d.field(key))
                                        on:input=move |ev| draft.update(|d| d.set_field(key, event_target_value(&ev)))
                                    />
                                }.into_any()
                            } else {
                                view! {
                                    <input
                                        type="text"
                                        prop:value=move || draft.with(|d| d.field(key))
                                        on:input=move |ev| draft.update(|d| d.set_field(key, event_target_value(&ev)))
                                    />
                                }.into_any()
                            }}
                        </label>
                    }
                }).collect_view()}
                <div class="dialog-buttons">
                    <button type="submit" class="confirm-btn">"OK"</button>
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.close_dialog()>"Cancel"</button>
                </div>
            </form>
        </div>
    }
}
