//! The entry form's unsaved state and its conversion to a stored record.

use api::record::parse_date;
use api::{DailyRecord, Medication, User};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::ratings::RatingsGrid;

/// Medication rows the form always shows.
pub const MEDICATION_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    /// `YYYY-MM-DD`, as typed into the date input.
    pub date: String,
    pub medications: Vec<Medication>,
    pub ratings: RatingsGrid,
}

impl EntryDraft {
    pub fn new(date: String) -> Self {
        Self {
            date,
            medications: vec![Medication::default(); MEDICATION_ROWS],
            ratings: RatingsGrid::default(),
        }
    }

    /// Blank draft dated today (UTC calendar date).
    pub fn for_today() -> Self {
        Self::new(api::record::format_date(OffsetDateTime::now_utc().date()))
    }

    /// Pad the medication list back up to the visible row count.
    pub fn ensure_medication_rows(&mut self, rows: usize) {
        if self.medications.len() < rows {
            self.medications.resize(rows, Medication::default());
        }
    }

    /// Assemble the record to insert. Blank medication rows are dropped;
    /// unset ratings stay unset.
    pub fn to_record(&self, user: Option<&User>, now: OffsetDateTime) -> Result<DailyRecord, String> {
        let date = parse_date(&self.date).ok_or_else(|| format!("Invalid date: {}", self.date))?;

        let mut record = DailyRecord::new(api::record::format_date(date), self.ratings.to_slices());
        record.medications = self
            .medications
            .iter()
            .filter(|med| !med.is_blank())
            .cloned()
            .collect();
        record.user_id = user.map(|u| u.id.clone());
        record.created_at = now.format(&Rfc3339).ok();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ratings::Period;
    use api::Metric;
    use time::macros::datetime;

    #[test]
    fn new_draft_has_three_blank_medication_rows() {
        let draft = EntryDraft::new("2024-05-01".into());
        assert_eq!(draft.medications.len(), MEDICATION_ROWS);
        assert!(draft.medications.iter().all(Medication::is_blank));
        assert!(draft.ratings.is_empty());
    }

    #[test]
    fn record_drops_blank_medications_and_attaches_owner() {
        let mut draft = EntryDraft::new("2024-05-01".into());
        draft.medications[1].name = "Sertraline".into();
        draft.medications[2].notes = Some("forgot".into());
        draft.ratings.set(Metric::Mood, Period::Morning, Some(7));

        let user = User {
            id: "u-1".into(),
            email: "me@example.com".into(),
        };
        let record = draft
            .to_record(Some(&user), datetime!(2024-05-01 08:30 UTC))
            .unwrap();

        assert_eq!(record.date, "2024-05-01");
        assert_eq!(record.medications.len(), 1);
        assert_eq!(record.medications[0].name, "Sertraline");
        assert_eq!(record.user_id.as_deref(), Some("u-1"));
        assert_eq!(record.created_at.as_deref(), Some("2024-05-01T08:30:00Z"));
        assert_eq!(record.slices.len(), 4);
        assert_eq!(record.slices[0].value(Metric::Mood), Some(7.0));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let draft = EntryDraft::new("May 1st".into());
        assert!(draft
            .to_record(None, datetime!(2024-05-01 08:30 UTC))
            .is_err());
    }

    #[test]
    fn medication_rows_are_padded_not_truncated() {
        let mut draft = EntryDraft::new("2024-05-01".into());
        draft.medications.clear();
        draft.ensure_medication_rows(MEDICATION_ROWS);
        assert_eq!(draft.medications.len(), 3);

        draft.medications.push(Medication::default());
        draft.ensure_medication_rows(MEDICATION_ROWS);
        assert_eq!(draft.medications.len(), 4);
    }
}
