//! Daily averages, trailing windows and completion ratios over stored records.
//!
//! "No data" is always `None`. Missing ratings are excluded from every mean;
//! they are never counted as zero.

use std::collections::BTreeMap;

use api::{DailyRecord, Metric};
use time::{Date, Duration};
use tracing::warn;

/// Length of the rolling summary windows.
pub const WINDOW_DAYS: u32 = 7;

/// Deltas smaller than this read as "flat".
const FLAT_DELTA: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAverage {
    pub date: Date,
    pub mood: Option<f64>,
    pub energy: Option<f64>,
    pub anxiety: Option<f64>,
}

impl DailyAverage {
    pub fn from_record(date: Date, record: &DailyRecord) -> Self {
        Self {
            date,
            mood: daily_average(record, Metric::Mood),
            energy: daily_average(record, Metric::Energy),
            anxiety: daily_average(record, Metric::Anxiety),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Mood => self.mood,
            Metric::Energy => self.energy,
            Metric::Anxiety => self.anxiety,
        }
    }

    /// Whether at least one metric has a value.
    pub fn has_data(&self) -> bool {
        Metric::ALL.iter().any(|metric| self.get(*metric).is_some())
    }
}

/// Mean of the numeric `metric` ratings across a record's slices.
pub fn daily_average(record: &DailyRecord, metric: Metric) -> Option<f64> {
    mean(record.slices.iter().filter_map(|slice| slice.value(metric)))
}

/// Share of `slice × metric` cells holding a rating, as a percentage.
pub fn completion_ratio(record: &DailyRecord) -> f64 {
    let cells = record.slices.len() * Metric::ALL.len();
    if cells == 0 {
        return 0.0;
    }
    let filled: usize = record
        .slices
        .iter()
        .map(|slice| {
            Metric::ALL
                .iter()
                .filter(|metric| slice.value(**metric).is_some())
                .count()
        })
        .sum();
    filled as f64 / cells as f64 * 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// The 7 days ending at a reference date against the 7 days before them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailingComparison {
    pub metric: Metric,
    pub current: Option<f64>,
    pub previous: Option<f64>,
    /// `current - previous`; `None` unless both windows have data.
    pub delta: Option<f64>,
}

impl TrailingComparison {
    pub fn trend(&self) -> Option<Trend> {
        self.delta.map(|delta| {
            if delta.abs() < FLAT_DELTA {
                Trend::Flat
            } else if delta > 0.0 {
                Trend::Up
            } else {
                Trend::Down
            }
        })
    }
}

/// Per-date averages keyed by calendar date.
///
/// Precondition: one record per date. When the input repeats a date, the
/// record appearing last in input order is used; callers wanting another
/// policy must dedupe first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    days: BTreeMap<Date, DailyAverage>,
}

impl DailySeries {
    pub fn from_records(records: &[DailyRecord]) -> Self {
        let mut days = BTreeMap::new();
        for record in records {
            match record.parsed_date() {
                Some(date) => {
                    days.insert(date, DailyAverage::from_record(date, record));
                }
                None => warn!(date = %record.date, "skipping record with unparsable date"),
            }
        }
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: Date) -> Option<&DailyAverage> {
        self.days.get(&date)
    }

    pub fn latest_date(&self) -> Option<Date> {
        self.days.keys().next_back().copied()
    }

    /// Averages in ascending date order.
    pub fn entries(&self) -> Vec<DailyAverage> {
        self.days.values().copied().collect()
    }

    /// Mean of the daily averages over `days` consecutive dates from `start`.
    /// Dates without a record are gaps, not zeros.
    pub fn window_summary(&self, start: Date, days: u32, metric: Metric) -> Option<f64> {
        mean((0..i64::from(days)).filter_map(|offset| {
            start
                .checked_add(Duration::days(offset))
                .and_then(|date| self.days.get(&date))
                .and_then(|average| average.get(metric))
        }))
    }

    pub fn trailing_comparison(&self, reference: Date, metric: Metric) -> TrailingComparison {
        let window = i64::from(WINDOW_DAYS);
        let summary = |back: i64| {
            reference
                .checked_sub(Duration::days(back))
                .and_then(|start| self.window_summary(start, WINDOW_DAYS, metric))
        };

        let current = summary(window - 1);
        let previous = summary(2 * window - 1);
        let delta = match (current, previous) {
            (Some(current), Some(previous)) => Some(current - previous),
            _ => None,
        };

        TrailingComparison {
            metric,
            current,
            previous,
            delta,
        }
    }

    /// Trailing comparison for every metric.
    pub fn weekly_overview(&self, reference: Date) -> Vec<TrailingComparison> {
        Metric::ALL
            .iter()
            .map(|metric| self.trailing_comparison(reference, *metric))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Slice;
    use time::macros::date;

    fn mood_record(date: &str, moods: &[Option<f64>]) -> DailyRecord {
        let slices = moods
            .iter()
            .map(|mood| {
                let mut slice = Slice::new("Morning");
                slice.mood = *mood;
                slice
            })
            .collect();
        DailyRecord::new(date, slices)
    }

    #[test]
    fn daily_average_ignores_unset_ratings() {
        let record = mood_record("2024-01-01", &[Some(4.0), Some(6.0), None]);
        assert_eq!(daily_average(&record, Metric::Mood), Some(5.0));

        let empty = mood_record("2024-01-01", &[None, None]);
        assert_eq!(daily_average(&empty, Metric::Mood), None);
        assert_eq!(daily_average(&empty, Metric::Energy), None);
    }

    #[test]
    fn window_divides_by_present_days_only() {
        let records = vec![
            mood_record("2024-01-01", &[Some(6.0)]),
            mood_record("2024-01-04", &[Some(8.0)]),
            mood_record("2024-01-07", &[Some(4.0)]),
        ];
        let series = DailySeries::from_records(&records);
        assert_eq!(
            series.window_summary(date!(2024 - 01 - 01), 7, Metric::Mood),
            Some(6.0)
        );
        assert_eq!(
            series.window_summary(date!(2024 - 01 - 08), 7, Metric::Mood),
            None
        );
    }

    #[test]
    fn trailing_comparison_needs_both_windows() {
        let records = vec![
            mood_record("2024-01-10", &[Some(7.0)]),
            mood_record("2024-01-12", &[Some(5.0)]),
        ];
        let series = DailySeries::from_records(&records);
        let comparison = series.trailing_comparison(date!(2024 - 01 - 14), Metric::Mood);
        assert_eq!(comparison.current, Some(6.0));
        assert_eq!(comparison.previous, None);
        assert_eq!(comparison.delta, None);
        assert_eq!(comparison.trend(), None);
    }

    #[test]
    fn trailing_comparison_windows_are_adjacent() {
        let records = vec![
            // Previous window: Jan 1..=Jan 7.
            mood_record("2024-01-01", &[Some(4.0)]),
            mood_record("2024-01-07", &[Some(6.0)]),
            // Current window: Jan 8..=Jan 14.
            mood_record("2024-01-08", &[Some(8.0)]),
            mood_record("2024-01-14", &[Some(7.0)]),
            // Outside both.
            mood_record("2023-12-31", &[Some(1.0)]),
        ];
        let series = DailySeries::from_records(&records);
        let comparison = series.trailing_comparison(date!(2024 - 01 - 14), Metric::Mood);
        assert_eq!(comparison.current, Some(7.5));
        assert_eq!(comparison.previous, Some(5.0));
        assert_eq!(comparison.delta, Some(2.5));
        assert_eq!(comparison.trend(), Some(Trend::Up));
    }

    #[test]
    fn completion_ratio_counts_numeric_cells() {
        let mut record = DailyRecord::new("2024-01-01", Vec::new());
        assert_eq!(completion_ratio(&record), 0.0);

        for (idx, period) in ["Morning", "Noon", "Afternoon", "Evening"].iter().enumerate() {
            let mut slice = Slice::new(*period);
            // 2, 2, 1, 1 filled cells.
            slice.mood = Some(5.0);
            if idx < 2 {
                slice.energy = Some(3.0);
            }
            record.slices.push(slice);
        }
        record.slices[3].mood = None;
        record.slices[3].anxiety = Some(2.0);
        assert_eq!(completion_ratio(&record), 50.0);
    }

    #[test]
    fn duplicate_dates_keep_the_last_record() {
        let records = vec![
            mood_record("2024-01-01", &[Some(2.0)]),
            mood_record("2024-01-01", &[Some(9.0)]),
        ];
        let series = DailySeries::from_records(&records);
        assert_eq!(series.len(), 1);
        assert_eq!(
            series.get(date!(2024 - 01 - 01)).and_then(|d| d.mood),
            Some(9.0)
        );
    }

    #[test]
    fn unparsable_dates_are_skipped_and_entries_ascend() {
        let records = vec![
            mood_record("2024-01-03", &[Some(6.0)]),
            mood_record("not a date", &[Some(1.0)]),
            mood_record("2024-01-01", &[Some(5.0)]),
        ];
        let series = DailySeries::from_records(&records);
        let dates: Vec<Date> = series.entries().iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date!(2024 - 01 - 01), date!(2024 - 01 - 03)]);
        assert_eq!(series.latest_date(), Some(date!(2024 - 01 - 03)));
    }

    #[test]
    fn averages_use_raw_values_even_out_of_range() {
        let record = mood_record("2024-01-01", &[Some(14.0), Some(2.0)]);
        assert_eq!(daily_average(&record, Metric::Mood), Some(8.0));
    }
}
