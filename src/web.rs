//! JS bindings for the page scripts
//!
//! Values cross the boundary as the same JSON the gateway stores.

use wasm_bindgen::prelude::*;

use crate::i18n::Language;
use crate::logging;
use crate::persistence::Gateway;
use crate::persistence::codec;
use crate::platform::LocalStorage;

fn gateway() -> Gateway<LocalStorage> {
    Gateway::browser()
}

/// Set `dir` and `lang` on `<html>`
fn apply_document_language(language: Language) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let _ = root.set_attribute("dir", language.direction().as_str());
    let _ = root.set_attribute("lang", language.code());
}

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    apply_document_language(gateway().get_language());
}

#[wasm_bindgen(js_name = getTasks)]
pub fn get_tasks() -> String {
    codec::encode_tasks(&gateway().get_tasks()).unwrap_or_else(|e| {
        log::error!("{}", e);
        "[]".to_string()
    })
}

#[wasm_bindgen(js_name = saveTasks)]
pub fn save_tasks(json: &str) {
    if let Err(e) = gateway().save_tasks_json(json) {
        log::error!("Refusing to save tasks: {}", e);
    }
}

#[wasm_bindgen(js_name = getNotes)]
pub fn get_notes() -> String {
    codec::encode_notes(&gateway().get_notes()).unwrap_or_else(|e| {
        log::error!("{}", e);
        "[]".to_string()
    })
}

#[wasm_bindgen(js_name = saveNotes)]
pub fn save_notes(json: &str) {
    if let Err(e) = gateway().save_notes_json(json) {
        log::error!("Refusing to save notes: {}", e);
    }
}

#[wasm_bindgen(js_name = getPomodoroSettings)]
pub fn get_pomodoro_settings() -> String {
    codec::encode_settings(&gateway().get_pomodoro_settings()).unwrap_or_else(|e| {
        log::error!("{}", e);
        "{}".to_string()
    })
}

/// Expects a complete record
#[wasm_bindgen(js_name = savePomodoroSettings)]
pub fn save_pomodoro_settings(json: &str) {
    if let Err(e) = gateway().save_pomodoro_settings_json(json) {
        log::error!("Refusing to save pomodoro settings: {}", e);
    }
}

#[wasm_bindgen(js_name = getLanguage)]
pub fn get_language() -> String {
    gateway().get_language().code().to_string()
}

/// Persist the language and update the document direction
#[wasm_bindgen(js_name = saveLanguage)]
pub fn save_language(code: &str) {
    match codec::decode_language(code) {
        Ok(language) => {
            gateway().save_language(language);
            apply_document_language(language);
        }
        Err(e) => log::warn!("{}", e),
    }
}
