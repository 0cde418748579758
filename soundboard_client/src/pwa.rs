use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::ServiceWorkerRegistration;

use crate::utils::js_reason;

/// Registers the offline service worker. Failures are only logged.
pub fn register_service_worker(script: &str) {
    let navigator = match web_sys::window() {
        Some(window) => window.navigator(),
        None => return,
    };
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
        log::info!("service workers are not supported");
        return;
    }

    let promise = navigator.service_worker().register(script);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(registration) => {
                let scope = registration
                    .dyn_into::<ServiceWorkerRegistration>()
                    .map(|r| r.scope())
                    .unwrap_or_default();
                log::info!("SW registered: {}", scope);
            }
            Err(e) => log::warn!("SW registration failed: {}", js_reason(&e)),
        }
    });
}
