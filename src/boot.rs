use geo_challenge_core::config::ReadinessConfig;
use geo_challenge_core::{GateStep, ReadinessGate};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};

use crate::leaflet;

/// Polls until Leaflet and its geocoder are on `window`. Resolves with
/// `GateStep::Fire` exactly once, or `GateStep::GaveUp` when a bounded
/// attempt budget runs out.
pub(crate) async fn wait_for_map_library(config: ReadinessConfig) -> GateStep {
    wait_until(config, leaflet::library_ready).await
}

pub(crate) async fn wait_until<P>(config: ReadinessConfig, mut probe: P) -> GateStep
where
    P: FnMut() -> bool,
{
    let mut gate = ReadinessGate::from_config(&config);
    loop {
        match gate.observe(probe()) {
            GateStep::Wait => TimeoutFuture::new(config.poll_interval_ms).await,
            step => return step,
        }
    }
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            if value != "{}" {
                return value;
            }
        }
    }
    if let Some(err) = error.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    "js error".to_string()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn fires_after_probe_turns_true() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = calls.clone();
        let config = ReadinessConfig {
            poll_interval_ms: 1,
            max_attempts: None,
        };
        let step = wait_until(config, move || {
            counter.set(counter.get() + 1);
            counter.get() >= 3
        })
        .await;
        assert_eq!(step, GateStep::Fire);
        assert_eq!(calls.get(), 3);
    }

    #[wasm_bindgen_test]
    async fn bounded_wait_gives_up() {
        let config = ReadinessConfig {
            poll_interval_ms: 1,
            max_attempts: Some(4),
        };
        assert_eq!(wait_until(config, || false).await, GateStep::GaveUp);
    }

    #[wasm_bindgen_test]
    fn library_absent_by_default() {
        assert!(!leaflet::library_ready());
    }

    #[wasm_bindgen_test]
    fn js_err_prefers_strings() {
        assert_eq!(js_err(JsValue::from_str("boom")), "boom");
        assert_eq!(js_err(js_sys::Error::new("bad").into()), "bad");
    }
}
