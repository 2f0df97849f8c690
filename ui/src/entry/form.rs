use api::Metric;
use dioxus::prelude::*;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::{metric_color, EntryDraft, Period, MEDICATION_ROWS};
use crate::components::{DialInput, MedicationInputs};
use crate::core::dial::{dial_diameter_for_width, GRID_DIAMETER};
use crate::core::session::{use_backend, use_current_user};
use crate::core::timing;
use crate::i18n::{tr_metric, tr_period};
use crate::t;

/// How long the "Saved" badge stays up.
const SAVED_BADGE_MS: u32 = 4000;

#[component]
pub fn EntryForm() -> Element {
    let backend = use_backend();
    let user = use_current_user();

    let mut draft = use_signal(EntryDraft::for_today);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    // Each save bumps the generation so an older timeout can't hide a newer badge.
    let mut saved_generation = use_signal(|| 0u64);
    let mut badge = use_signal(|| Option::<u64>::None);
    let mut grid_width = use_signal(|| Option::<f64>::None);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        saving.set(true);
        error.set(None);

        let owner = user();
        let outcome = draft
            .read()
            .to_record(owner.as_ref(), OffsetDateTime::now_utc())
            .and_then(|record| backend.insert(record).map_err(|err| err.to_string()));

        match outcome {
            Ok(id) => {
                info!(id = %id, "entry saved");
                let generation = saved_generation() + 1;
                saved_generation.set(generation);
                badge.set(Some(generation));
                spawn(async move {
                    timing::sleep_ms(SAVED_BADGE_MS).await;
                    if badge() == Some(generation) {
                        badge.set(None);
                    }
                });
            }
            Err(message) => {
                warn!(error = %message, "entry not saved");
                error.set(Some(message));
            }
        }
        saving.set(false);
    };

    let snapshot = draft.read().clone();
    let diameter = grid_width()
        .map(dial_diameter_for_width)
        .unwrap_or(GRID_DIAMETER);
    let filled = snapshot.ratings.filled_cells();
    let total = Metric::ALL.len() * Period::ALL.len();

    rsx! {
        form { class: "entry", onsubmit: on_submit,
            if user().is_none() {
                p { class: "entry__hint", {t!("entry-anonymous")} }
            }

            section { class: "card entry__meta",
                label { class: "field",
                    span { class: "field__label", {t!("entry-date")} }
                    input {
                        class: "field__input",
                        r#type: "date",
                        value: "{snapshot.date}",
                        oninput: move |evt: FormEvent| draft.write().date = evt.value(),
                    }
                }
                MedicationInputs {
                    medications: snapshot.medications.clone(),
                    rows: MEDICATION_ROWS,
                    on_change: move |meds| draft.write().medications = meds,
                }
            }

            section { class: "card entry__ratings",
                div { class: "card__header",
                    h2 { class: "section-title", {t!("entry-ratings")} }
                    span { class: "card__meta", {t!("entry-filled", filled = filled, total = total)} }
                }
                div {
                    class: "ratings",
                    onresize: move |evt: ResizeEvent| {
                        if let Ok(size) = evt.data().get_content_box_size() {
                            grid_width.set(Some(size.width));
                        }
                    },
                    table { class: "ratings__table",
                        thead {
                            tr {
                                th {}
                                for period in Period::ALL {
                                    th { key: "{period.label()}", {tr_period(period)} }
                                }
                            }
                        }
                        tbody {
                            for metric in Metric::ALL {
                                tr { key: "{metric.key()}",
                                    th { class: "ratings__metric", scope: "row", {tr_metric(metric)} }
                                    for period in Period::ALL {
                                        td { key: "{period.label()}",
                                            DialInput {
                                                value: snapshot.ratings.get(metric, period),
                                                on_change: move |value: i32| {
                                                    draft.write().ratings.set(metric, period, Some(value));
                                                },
                                                color: metric_color(metric).to_string(),
                                                diameter,
                                                label: format!("{} {}", tr_metric(metric), tr_period(period)),
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "entry__actions",
                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: saving(),
                    if saving() {
                        {t!("entry-saving")}
                    } else {
                        {t!("entry-save")}
                    }
                }
                if badge().is_some() {
                    span { class: "status status--success", {t!("entry-saved")} }
                }
                if let Some(message) = error() {
                    span { class: "status status--error", "{message}" }
                }
            }
        }
    }
}
