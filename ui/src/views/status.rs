use dioxus::prelude::*;

use crate::core::platform::Platform;
use crate::t;

/// Health page: renders as long as routing works.
#[component]
pub fn Status() -> Element {
    let platform = Platform::current().label();

    rsx! {
        section { class: "page page-status",
            h1 { {t!("status-title")} }
            p { {t!("status-body", platform = platform)} }
            Link { class: "button button--primary", to: "/", {t!("status-home")} }
        }
    }
}
