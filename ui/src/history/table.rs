use api::DailyRecord;
use dioxus::prelude::*;

use crate::history::history_rows;
use crate::t;

/// Per-day averages and completion, newest first.
#[component]
pub fn HistoryTable(records: Vec<DailyRecord>) -> Element {
    let rows = history_rows(&records);

    rsx! {
        section { class: "card history-table",
            div { class: "card__header",
                h2 { class: "section-title", {t!("history-entries")} }
                if !rows.is_empty() {
                    span { class: "card__meta", {t!("history-count", count = rows.len())} }
                }
            }
            div { class: "history-table__scroll",
                table {
                    thead {
                        tr {
                            th { {t!("history-col-date")} }
                            th { {t!("history-col-mood")} }
                            th { {t!("history-col-energy")} }
                            th { {t!("history-col-anxiety")} }
                            th { {t!("history-col-completion")} }
                        }
                    }
                    tbody {
                        if rows.is_empty() {
                            tr {
                                td { colspan: "5", class: "history-table__placeholder", {t!("history-empty")} }
                            }
                        } else {
                            for row in rows.into_iter() {
                                tr { key: "{row.key}",
                                    td { class: "history-table__date", "{row.date}" }
                                    for (idx, cell) in row.display_cells().into_iter().enumerate() {
                                        td { key: "{idx}", class: "history-table__value", "{cell}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
