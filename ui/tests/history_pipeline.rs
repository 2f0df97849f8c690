//! Entry form output flows through the backend into the history page's
//! summary cards and trend chart.

use api::{Backend, MemoryBackend, Metric};
use time::macros::{date, datetime};
use ui::core::aggregate::Trend;
use ui::core::chart::{layout, ChartConfig, ChartLayout};
use ui::entry::{EntryDraft, Period};
use ui::history::{palette, HistoryState, HistorySummary};

fn save_day(backend: &MemoryBackend, user: &api::User, day: &str, mood: i32) {
    let mut draft = EntryDraft::new(day.to_string());
    draft.ratings.set(Metric::Mood, Period::Morning, Some(mood));
    draft.ratings.set(Metric::Mood, Period::Evening, Some(mood + 2));
    draft.ratings.set(Metric::Energy, Period::Noon, Some(5));
    let record = draft
        .to_record(Some(user), datetime!(2024-03-01 12:00 UTC))
        .expect("valid draft");
    backend.insert(record).expect("insert");
}

#[test]
fn saved_entries_drive_summary_and_chart() {
    let backend = MemoryBackend::new();
    let user = backend.sign_up("me@example.com", "secret1").unwrap();

    // Previous window: daily mood average 4. Current window: 7.
    save_day(&backend, &user, "2024-02-20", 3);
    save_day(&backend, &user, "2024-02-27", 6);
    save_day(&backend, &user, "2024-03-01", 6);

    let state = HistoryState::load(&backend, &user);
    assert_eq!(state.error, None);
    assert_eq!(state.records.len(), 3);
    assert_eq!(state.records[0].date, "2024-03-01");

    let series = state.series();
    let summary = HistorySummary::new(&series, date!(2024 - 03 - 01));
    let mood = summary
        .comparisons
        .iter()
        .find(|c| c.metric == Metric::Mood)
        .expect("mood comparison");
    assert_eq!(mood.current, Some(7.0));
    assert_eq!(mood.previous, Some(4.0));
    assert_eq!(mood.trend(), Some(Trend::Up));

    let ChartLayout::Plot(plot) = layout(&series.entries(), 600.0, 240.0, &ChartConfig::default())
    else {
        panic!("three days should plot");
    };
    assert_eq!(plot.legend(), vec![Metric::Mood, Metric::Energy]);
    let svg = plot.to_svg(&palette());
    assert!(svg.contains("<polyline"));
}

#[test]
fn signed_out_drafts_have_no_owner() {
    let draft = EntryDraft::new("2024-03-01".to_string());
    let record = draft
        .to_record(None, datetime!(2024-03-01 08:30 UTC))
        .expect("valid draft");
    assert_eq!(record.user_id, None);
    assert_eq!(record.slices.len(), Period::ALL.len());
    assert!(record.medications.is_empty());
}

#[test]
fn a_single_day_is_not_a_trend() {
    let backend = MemoryBackend::new();
    let user = backend.sign_up("me@example.com", "secret1").unwrap();
    save_day(&backend, &user, "2024-03-01", 5);

    let series = HistoryState::load(&backend, &user).series();
    assert_eq!(
        layout(&series.entries(), 600.0, 240.0, &ChartConfig::default()),
        ChartLayout::Placeholder
    );
}
