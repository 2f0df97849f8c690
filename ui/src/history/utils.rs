use api::{DailyRecord, Metric};
use time::{macros::format_description, OffsetDateTime};

use crate::core::aggregate::{completion_ratio, daily_average};
use crate::core::format::{format_average, format_percent};

/// One table/CSV row per stored record, in the records' order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HistoryRow {
    pub key: String,
    pub date: String,
    pub mood: Option<f64>,
    pub energy: Option<f64>,
    pub anxiety: Option<f64>,
    pub completion: f64,
}

impl HistoryRow {
    pub fn from_record(record: &DailyRecord) -> Self {
        Self {
            key: record.id.clone().unwrap_or_else(|| record.date.clone()),
            date: record.date.clone(),
            mood: daily_average(record, Metric::Mood),
            energy: daily_average(record, Metric::Energy),
            anxiety: daily_average(record, Metric::Anxiety),
            completion: completion_ratio(record),
        }
    }

    pub fn display_cells(&self) -> [String; 4] {
        [
            format_average(self.mood),
            format_average(self.energy),
            format_average(self.anxiety),
            format_percent(self.completion),
        ]
    }
}

pub(crate) fn history_rows(records: &[DailyRecord]) -> Vec<HistoryRow> {
    records.iter().map(HistoryRow::from_record).collect()
}

/// CSV with one line per record. Missing averages are empty fields.
pub(crate) fn build_csv(records: &[DailyRecord]) -> String {
    let mut csv = String::from("date,mood_avg,energy_avg,anxiety_avg,completion_pct,medications\n");
    for record in records {
        let row = HistoryRow::from_record(record);
        let meds = record
            .medications
            .iter()
            .map(|med| {
                [med.name.trim(), med.dose.trim(), med.time.trim()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("; ");

        let fields = [
            row.date.clone(),
            csv_number(row.mood),
            csv_number(row.energy),
            csv_number(row.anxiety),
            format!("{:.0}", row.completion),
            meds,
        ];
        let line = fields
            .iter()
            .map(|field| escape_csv(field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }
    csv
}

fn csv_number(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

pub(crate) fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub(crate) fn timestamp_slug() -> String {
    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Medication, Slice};

    #[test]
    fn csv_has_header_and_blank_missing_averages() {
        let mut record = DailyRecord::new(
            "2024-04-02",
            vec![
                Slice::new("Morning").with(Metric::Mood, 4.0),
                Slice::new("Noon").with(Metric::Mood, 5.0),
            ],
        );
        record.medications.push(Medication {
            name: "Ibuprofen".into(),
            dose: "200mg".into(),
            time: "08:00".into(),
            notes: None,
        });
        record.medications.push(Medication {
            name: "Vitamin D, 1000IU".into(),
            ..Medication::default()
        });

        let csv = build_csv(&[record]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,mood_avg,energy_avg,anxiety_avg,completion_pct,medications");
        assert_eq!(
            lines[1],
            "2024-04-02,4.50,,,33,\"Ibuprofen 200mg 08:00; Vitamin D, 1000IU\""
        );
    }

    #[test]
    fn rows_format_missing_values_as_dash() {
        let row = HistoryRow::from_record(&DailyRecord::new("2024-04-02", Vec::new()));
        assert_eq!(row.display_cells(), ["—", "—", "—", "0%"].map(String::from));
        assert_eq!(row.key, "2024-04-02");
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("plain"), "plain");
    }
}
