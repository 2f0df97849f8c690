use dioxus::prelude::*;

use crate::core::dial::{DialConfig, DialGeometry, DialGesture, KeyStep, DEFAULT_DIAMETER};
use crate::core::platform;

/// Radial 1–10 style rating control.
///
/// Controlled: the caller owns `value` and receives every change through
/// `on_change`. A value is emitted only when a gesture or key press lands on
/// a different step.
#[component]
pub fn DialInput(
    #[props(!optional)] value: Option<i32>,
    on_change: EventHandler<i32>,
    #[props(default = 1)] min: i32,
    #[props(default = 10)] max: i32,
    #[props(default = 1)] step: i32,
    #[props(default = "#6366f1".to_string())] color: String,
    #[props(default = DEFAULT_DIAMETER)] diameter: f64,
    #[props(default)] label: String,
) -> Element {
    let geometry = DialGeometry::new(DialConfig::new(min, max, step), diameter);
    let config = geometry.config;
    let mut gesture = use_signal(DialGesture::default);

    let display = config.display_value(value);
    let track = geometry.track_path();
    let arc = geometry.value_arc_path(display);
    let knob = geometry.knob(display);
    let size = geometry.diameter;
    let stroke = geometry.stroke;
    let center = geometry.center;
    let label_y = geometry.label_y();
    let font_size = geometry.label_font_size();
    let max_aligned = config.max_aligned();
    let active = gesture.read().is_active();

    let emit_at = move |evt: &PointerEvent, dragging: bool| {
        let point = evt.element_coordinates();
        let (dx, dy) = geometry.offset_from_center(point.x, point.y);
        let next = if dragging {
            config.resolve_drag(value, dx, dy)
        } else {
            config.resolve_pointer(value, dx, dy)
        };
        if let Some(next) = next {
            on_change.call(next);
        }
    };

    let onpointerdown = move |evt: PointerEvent| {
        evt.prevent_default();
        gesture.write().press(evt.pointer_id());
        platform::capture_pointer(&evt);
        emit_at(&evt, false);
    };

    let onpointermove = move |evt: PointerEvent| {
        if !gesture.read().tracks(evt.pointer_id()) {
            return;
        }
        let held = !evt.held_buttons().is_empty();
        if gesture.write().follow(evt.pointer_id(), held) {
            emit_at(&evt, true);
        }
    };

    let onpointerup = move |evt: PointerEvent| {
        if gesture.write().release(evt.pointer_id()) {
            platform::release_pointer(&evt);
        }
    };

    let onpointercancel = move |evt: PointerEvent| {
        if gesture.write().release(evt.pointer_id()) {
            platform::release_pointer(&evt);
        }
    };

    // Without capture the dial stops seeing the pointer once it leaves.
    let onpointerleave = move |evt: PointerEvent| {
        if !platform::POINTER_CAPTURE {
            gesture.write().release(evt.pointer_id());
        }
    };

    let onlostpointercapture = move |evt: PointerEvent| {
        gesture.write().release(evt.pointer_id());
    };

    let onfocusout = move |_evt: FocusEvent| {
        gesture.write().cancel();
    };

    let onkeydown = move |evt: KeyboardEvent| {
        let key = evt.key().to_string();
        if KeyStep::from_key(&key).is_none() {
            return;
        }
        evt.prevent_default();
        if let Some(next) = config.resolve_key(value, &key) {
            on_change.call(next);
        }
    };

    let class = match (value.is_some(), active) {
        (_, true) => "dial dial--active",
        (false, false) => "dial dial--unset",
        (true, false) => "dial",
    };
    let knob_opacity = if value.is_some() { "1" } else { "0.45" };

    rsx! {
        div {
            class: "{class}",
            role: "slider",
            tabindex: "0",
            aria_label: "{label}",
            aria_valuemin: "{config.min}",
            aria_valuemax: "{max_aligned}",
            aria_valuenow: "{display}",
            style: "width:{size}px;height:{size}px;touch-action:none;",
            onpointerdown,
            onpointermove,
            onpointerup,
            onpointercancel,
            onpointerleave,
            onlostpointercapture,
            onfocusout,
            onkeydown,

            svg {
                width: "{size}",
                height: "{size}",
                view_box: "0 0 {size} {size}",
                style: "pointer-events:none;display:block",
                "aria-hidden": "true",

                path {
                    class: "dial__track",
                    d: "{track}",
                    fill: "none",
                    stroke_width: "{stroke}",
                    stroke_linecap: "round",
                }
                if let Some(arc) = arc {
                    path {
                        class: "dial__value",
                        d: "{arc}",
                        fill: "none",
                        stroke: "{color}",
                        stroke_width: "{stroke}",
                        stroke_linecap: "round",
                    }
                }
                circle {
                    class: "dial__knob",
                    cx: "{knob.cx}",
                    cy: "{knob.cy}",
                    r: "{knob.r}",
                    fill: "{color}",
                    opacity: "{knob_opacity}",
                }
                if let Some(current) = value {
                    text {
                        class: "dial__label",
                        x: "{center}",
                        y: "{label_y}",
                        text_anchor: "middle",
                        font_size: "{font_size}",
                        "{current}"
                    }
                }
            }
        }
    }
}
