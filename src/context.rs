//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::{Contact, ContactDraft};

/// How long a notice stays on screen
const NOTICE_MS: u32 = 4000;

/// Which dialog is open
#[derive(Debug, Clone, PartialEq)]
pub enum DialogMode {
    Add,
    Edit(Contact),
}

impl DialogMode {
    pub fn title(&self) -> &'static str {
        match self {
            DialogMode::Add => "Add New Contact",
            DialogMode::Edit(_) => "Edit Contact",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            DialogMode::Add => "Fill in the information for the new Contact",
            DialogMode::Edit(_) => "Fill in the information you want to edit",
        }
    }

    /// Initial form contents
    pub fn draft(&self) -> ContactDraft {
        match self {
            DialogMode::Add => ContactDraft::default(),
            DialogMode::Edit(contact) => contact.to_draft(),
        }
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload contacts from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload contacts from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Open dialog, if any - read
    pub dialog: ReadSignal<Option<DialogMode>>,
    /// Open dialog, if any - write
    set_dialog: WriteSignal<Option<DialogMode>>,
    /// Transient message under the table
    pub notice: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        dialog: (ReadSignal<Option<DialogMode>>, WriteSignal<Option<DialogMode>>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            dialog: dialog.0,
            set_dialog: dialog.1,
            notice: RwSignal::new(None),
        }
    }

    /// Trigger a reload of contacts
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn open_dialog(&self, mode: DialogMode) {
        self.set_dialog.set(Some(mode));
    }

    pub fn close_dialog(&self) {
        self.set_dialog.set(None);
    }

    /// Show a message for a few seconds
    pub fn flash(&self, message: impl Into<String>) {
        let message = message.into();
        web_sys::console::log_1(&format!("[NOTICE] {}", message).into());
        self.notice.set(Some(message.clone()));
        let notice = self.notice;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_MS).await;
            // Only clear if nothing newer replaced it
            if notice.get_untracked().as_deref() == Some(message.as_str()) {
                notice.set(None);
            }
        });
    }
}
