use api::Medication;
use dioxus::prelude::*;

use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Dose,
    Time,
    Notes,
}

fn apply(med: &mut Medication, field: Field, value: String) {
    match field {
        Field::Name => med.name = value,
        Field::Dose => med.dose = value,
        Field::Time => med.time = value,
        Field::Notes => med.notes = (!value.is_empty()).then_some(value),
    }
}

/// Editable medication table. Always shows at least `rows` rows; the caller
/// decides which ones are worth keeping.
#[component]
pub fn MedicationInputs(
    medications: Vec<Medication>,
    on_change: EventHandler<Vec<Medication>>,
    #[props(default = 3)] rows: usize,
) -> Element {
    let mut padded = medications.clone();
    if padded.len() < rows {
        padded.resize(rows, Medication::default());
    }

    let snapshot = padded.clone();
    let cell = move |idx: usize, field: Field, current: String, placeholder: String| {
        let base = snapshot.clone();
        rsx! {
            td {
                input {
                    class: "field__input field__input--compact",
                    r#type: "text",
                    placeholder: "{placeholder}",
                    value: "{current}",
                    oninput: move |evt: FormEvent| {
                        let mut next = base.clone();
                        if let Some(med) = next.get_mut(idx) {
                            apply(med, field, evt.value());
                        }
                        on_change.call(next);
                    },
                }
            }
        }
    };

    let name_placeholder = t!("medication-name");
    let dose_placeholder = t!("medication-dose");
    let notes_placeholder = t!("medication-notes");

    rsx! {
        div { class: "medications",
            h2 { class: "section-title", {t!("medication-heading")} }
            div { class: "medications__scroll",
                table { class: "medications__table",
                    thead {
                        tr {
                            th { {t!("medication-name")} }
                            th { {t!("medication-dose")} }
                            th { {t!("medication-time")} }
                            th { {t!("medication-notes")} }
                        }
                    }
                    tbody {
                        for (idx, med) in padded.iter().enumerate() {
                            tr { key: "{idx}",
                                {cell(idx, Field::Name, med.name.clone(), name_placeholder.clone())}
                                {cell(idx, Field::Dose, med.dose.clone(), dose_placeholder.clone())}
                                {cell(idx, Field::Time, med.time.clone(), "08:00".to_string())}
                                {cell(idx, Field::Notes, med.notes.clone().unwrap_or_default(), notes_placeholder.clone())}
                            }
                        }
                    }
                }
            }
        }
    }
}
