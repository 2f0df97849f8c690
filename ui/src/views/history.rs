use dioxus::prelude::*;

use crate::core::session::{use_backend, use_current_user};
use crate::history::{
    HistoryExportPanel, HistoryState, HistorySummary, HistoryTable, SummaryCards, TrendChart,
};
use crate::i18n::use_language_marker;
use crate::t;

#[component]
pub fn History() -> Element {
    let lang_marker = use_language_marker();
    let backend = use_backend();
    let user = use_current_user();

    // Reloads whenever the session changes.
    let state = use_memo(move || user().map(|current| HistoryState::load(&*backend, &current)));

    let body = match state() {
        None => rsx! {
            p { class: "card card__placeholder", {t!("history-signed-out")} }
        },
        Some(state) => {
            let series = state.series();
            let summary = HistorySummary::today(&series);
            rsx! {
                if let Some(err) = state.error.clone() {
                    p { class: "status status--error", "{err}" }
                }
                SummaryCards { comparisons: summary.comparisons }
                TrendChart { entries: series.entries() }
                HistoryTable { records: state.records.clone() }
                HistoryExportPanel { records: state.records.clone() }
            }
        }
    };

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        section { class: "page page-history",
            h1 { {t!("page-history-title")} }
            p { class: "page__intro", {t!("page-history-intro")} }
            {body}
        }
    }
}
