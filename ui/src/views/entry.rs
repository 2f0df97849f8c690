use dioxus::prelude::*;

use crate::entry::EntryForm;
use crate::i18n::use_language_marker;
use crate::t;

#[component]
pub fn Entry() -> Element {
    let lang_marker = use_language_marker();

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        section { class: "page page-entry",
            h1 { {t!("page-entry-title")} }
            p { class: "page__intro", {t!("page-entry-intro")} }
            EntryForm {}
        }
    }
}
