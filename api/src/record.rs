//! Record shapes exchanged with the backend.
//!
//! The slice layout mirrors what the entry form has always written: the
//! period name sits next to one optional field per metric. Stored data is
//! untrusted, so metric fields deserialize leniently (see [`Slice`]).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::{macros::format_description, Date};

/// A tracked metric. Wire keys are the lowercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Mood,
    Energy,
    Anxiety,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Mood, Metric::Energy, Metric::Anxiety];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Mood => "mood",
            Metric::Energy => "energy",
            Metric::Anxiety => "anxiety",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Mood => "Mood",
            Metric::Energy => "Energy",
            Metric::Anxiety => "Anxiety",
        }
    }
}

/// One time-of-day segment of a day.
///
/// Each metric is independently optional. Absent keys, `null`, empty
/// strings, non-numeric strings and non-finite numbers all read as "no
/// data"; numeric strings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub period: String,
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub mood: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub energy: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub anxiety: Option<f64>,
}

impl Slice {
    pub fn new<T: Into<String>>(period: T) -> Self {
        Self {
            period: period.into(),
            ..Self::default()
        }
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::Mood => self.mood = value,
            Metric::Energy => self.energy = value,
            Metric::Anxiety => self.anxiety = value,
        }
    }

    /// Numeric rating for `metric`, or `None` when the cell is empty or not a finite number.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        let raw = match metric {
            Metric::Mood => self.mood,
            Metric::Energy => self.energy,
            Metric::Anxiety => self.anxiety,
        };
        raw.filter(|value| value.is_finite())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dose: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Medication {
    /// A row counts as blank when name, dose and time are all empty; notes alone don't keep it.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.dose.trim().is_empty() && self.time.trim().is_empty()
    }
}

/// All slices for one calendar date, plus medication notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub date: String,
    #[serde(default)]
    pub slices: Vec<Slice>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl DailyRecord {
    pub fn new<T: Into<String>>(date: T, slices: Vec<Slice>) -> Self {
        Self {
            date: date.into(),
            slices,
            ..Self::default()
        }
    }

    pub fn parsed_date(&self) -> Option<Date> {
        parse_date(&self.date)
    }
}

/// Query options understood by every backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    /// Restrict to one user's records; `None` returns everything.
    pub user_id: Option<String>,
    pub limit: usize,
    pub newest_first: bool,
}

impl EntryFilter {
    pub const DEFAULT_LIMIT: usize = 60;

    pub fn for_user<T: Into<String>>(user_id: T) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            user_id: None,
            limit: Self::DEFAULT_LIMIT,
            newest_first: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(rating_from_value))
}

fn rating_from_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn slice_tolerates_blank_and_missing_metrics() {
        let slice: Slice = serde_json::from_value(json!({
            "period": "Morning",
            "mood": 6,
            "energy": "",
        }))
        .unwrap();

        assert_eq!(slice.value(Metric::Mood), Some(6.0));
        assert_eq!(slice.value(Metric::Energy), None);
        assert_eq!(slice.value(Metric::Anxiety), None);
    }

    #[test]
    fn slice_accepts_numeric_strings_and_rejects_garbage() {
        let slice: Slice = serde_json::from_value(json!({
            "period": "Noon",
            "mood": "7",
            "energy": "NaN",
            "anxiety": { "nested": true },
        }))
        .unwrap();

        assert_eq!(slice.value(Metric::Mood), Some(7.0));
        assert_eq!(slice.value(Metric::Energy), None);
        assert_eq!(slice.value(Metric::Anxiety), None);
    }

    #[test]
    fn non_finite_values_read_as_missing() {
        let slice = Slice::new("Evening").with(Metric::Anxiety, f64::NAN);
        assert_eq!(slice.value(Metric::Anxiety), None);
    }

    #[test]
    fn record_round_trips_wire_shape() {
        let record = DailyRecord::new(
            "2024-01-02",
            vec![Slice::new("Morning").with(Metric::Mood, 4.0)],
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "2024-01-02",
                "slices": [{ "period": "Morning", "mood": 4.0 }],
                "medications": [],
            })
        );
    }

    #[test]
    fn medication_with_only_notes_is_blank() {
        let med = Medication {
            notes: Some("with food".into()),
            ..Medication::default()
        };
        assert!(med.is_blank());

        let med = Medication {
            dose: "10mg".into(),
            ..Medication::default()
        };
        assert!(!med.is_blank());
    }

    #[test]
    fn dates_parse_iso_calendar_format() {
        assert_eq!(parse_date("2024-03-09"), Some(date!(2024 - 03 - 09)));
        assert_eq!(parse_date(" 2024-03-09 "), Some(date!(2024 - 03 - 09)));
        assert_eq!(parse_date("03/09/2024"), None);
        assert_eq!(format_date(date!(2024 - 03 - 09)), "2024-03-09");
    }
}
