//! Backend Events
//!
//! The backend emits `contacts-changed` whenever the store changes.

use wasm_bindgen::prelude::*;
use crate::models::ChangeEvent;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> JsValue;
}

/// Call `on_change` for every store change except plain saves
pub async fn on_contacts_changed(mut on_change: impl FnMut() + 'static) {
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        let payload = js_sys::Reflect::get(&event, &JsValue::from_str("payload")).unwrap_or(JsValue::NULL);
        match serde_wasm_bindgen::from_value::<ChangeEvent>(payload) {
            Ok(change) if change.kind == "saved" => {}
            _ => on_change(),
        }
    });
    let _ = listen("contacts-changed", &handler).await;
    // Listener lives as long as the window
    handler.forget();
}
