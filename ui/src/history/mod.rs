//! History page building blocks: loading, summary cards, trend chart,
//! entries table and export.

mod charts;
pub use charts::{SummaryCards, TrendChart};

mod export;
pub use export::HistoryExportPanel;

mod table;
pub use table::HistoryTable;

mod utils;
pub(crate) use utils::*;

use api::{Backend, DailyRecord, EntryFilter, User};
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

use crate::core::aggregate::{DailySeries, TrailingComparison};
use crate::core::chart::ChartPalette;

/// Colors shared by the inline chart and the PNG export.
pub fn palette() -> ChartPalette {
    ChartPalette::default()
}

/// Records for the history page, newest first, or the load error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryState {
    pub records: Vec<DailyRecord>,
    pub error: Option<String>,
}

impl HistoryState {
    pub fn load(backend: &dyn Backend, user: &User) -> Self {
        match backend.query(&EntryFilter::for_user(user.id.clone())) {
            Ok(records) => {
                info!(count = records.len(), "history loaded");
                Self {
                    records,
                    error: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "history load failed");
                Self {
                    records: Vec::new(),
                    error: Some(format!("Couldn't load entries: {err}")),
                }
            }
        }
    }

    pub fn series(&self) -> DailySeries {
        DailySeries::from_records(&self.records)
    }
}

/// Derived numbers for the summary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub reference: Date,
    pub comparisons: Vec<TrailingComparison>,
}

impl HistorySummary {
    /// Trailing windows end at `reference` (normally today).
    pub fn new(series: &DailySeries, reference: Date) -> Self {
        Self {
            reference,
            comparisons: series.weekly_overview(reference),
        }
    }

    pub fn today(series: &DailySeries) -> Self {
        Self::new(series, OffsetDateTime::now_utc().date())
    }
}
