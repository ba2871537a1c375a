use log::debug;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Function, Reflect};

pub const SIGNUP_EVENT: &str = "beta_signup";

#[derive(Debug, Serialize)]
pub struct EventParams<'a> {
    pub event_category: &'a str,
    pub event_label: &'a str,
}

fn tracker() -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str("gtag"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Reports a finished signup if the page loaded a `gtag` tracker.
pub fn track_signup(usecase: &str) {
    let Some(gtag) = tracker() else {
        debug!("no gtag, skipping signup event");
        return;
    };
    let params = EventParams {
        event_category: "engagement",
        event_label: usecase,
    };
    let Ok(params) = serde_wasm_bindgen::to_value(&params) else {
        return;
    };
    if let Err(e) = gtag.call3(
        &JsValue::NULL,
        &JsValue::from_str("event"),
        &JsValue::from_str(SIGNUP_EVENT),
        &params,
    ) {
        debug!("gtag threw: {:?}", e);
    }
}
