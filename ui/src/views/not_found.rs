use dioxus::prelude::*;

use crate::t;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    tracing::debug!(%path, "unknown route");

    rsx! {
        section { class: "page page-not-found",
            h1 { {t!("not-found-title")} }
            p { {t!("not-found-body", path = path)} }
            Link { class: "button button--primary", to: "/", {t!("not-found-home")} }
        }
    }
}
