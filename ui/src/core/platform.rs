//! Platform glue: future spawning and browser pointer capture.

use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
    Mobile,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else if cfg!(any(target_os = "android", target_os = "ios")) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

/// Whether [`capture_pointer`] really redirects later pointer events.
pub const POINTER_CAPTURE: bool = cfg!(target_arch = "wasm32");

/// Run a future to completion on the browser's microtask queue.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Run a future to completion on the current thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    futures::executor::block_on(future);
}

/// Ask the browser to route every event of `pointer_id` to the dial element.
#[cfg(target_arch = "wasm32")]
pub fn capture_pointer(event: &dioxus::prelude::PointerEvent) {
    with_pointer_target(event, |element, id| {
        if element.set_pointer_capture(id).is_err() {
            tracing::debug!(pointer = id, "pointer capture refused");
        }
    });
}

#[cfg(target_arch = "wasm32")]
pub fn release_pointer(event: &dioxus::prelude::PointerEvent) {
    with_pointer_target(event, |element, id| {
        if element.has_pointer_capture(id) {
            let _ = element.release_pointer_capture(id);
        }
    });
}

#[cfg(target_arch = "wasm32")]
fn with_pointer_target(
    event: &dioxus::prelude::PointerEvent,
    apply: impl FnOnce(&web_sys::Element, i32),
) {
    use wasm_bindgen::JsCast;

    // Listeners are delegated to the root, so the event target (not the
    // current target) is the dial element.
    let Some(raw) = event.data().downcast::<web_sys::PointerEvent>() else {
        return;
    };
    let Some(element) = raw
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
    else {
        return;
    };
    apply(&element, raw.pointer_id());
}

/// Native webviews offer no capture from here. Moves outside the dial never
/// arrive, so callers end the gesture on pointer-leave and on button-less moves.
#[cfg(not(target_arch = "wasm32"))]
pub fn capture_pointer(_event: &dioxus::prelude::PointerEvent) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn release_pointer(_event: &dioxus::prelude::PointerEvent) {}
