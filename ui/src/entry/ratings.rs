//! Form-side state for the metric × period ratings grid.

use api::{Metric, Slice};

/// Time-of-day columns of the grid. `label()` is what gets stored as the
/// slice's `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Morning,
    Noon,
    Afternoon,
    Evening,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Morning,
        Period::Noon,
        Period::Afternoon,
        Period::Evening,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Noon => "Noon",
            Period::Afternoon => "Afternoon",
            Period::Evening => "Evening",
        }
    }

    fn index(self) -> usize {
        match self {
            Period::Morning => 0,
            Period::Noon => 1,
            Period::Afternoon => 2,
            Period::Evening => 3,
        }
    }
}

/// Accent color of a metric's dials and chart line.
pub fn metric_color(metric: Metric) -> &'static str {
    match metric {
        Metric::Mood => "#6366f1",
        Metric::Energy => "#22d3ee",
        Metric::Anxiety => "#f472b6",
    }
}

fn metric_index(metric: Metric) -> usize {
    match metric {
        Metric::Mood => 0,
        Metric::Energy => 1,
        Metric::Anxiety => 2,
    }
}

/// Every cell starts unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingsGrid {
    cells: [[Option<i32>; 4]; 3],
}

impl RatingsGrid {
    pub fn get(&self, metric: Metric, period: Period) -> Option<i32> {
        self.cells[metric_index(metric)][period.index()]
    }

    pub fn set(&mut self, metric: Metric, period: Period, value: Option<i32>) {
        self.cells[metric_index(metric)][period.index()] = value;
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_cells() == 0
    }

    /// One slice per period, in column order. Unset cells stay `None`, so a
    /// partially rated period is still stored.
    pub fn to_slices(&self) -> Vec<Slice> {
        Period::ALL
            .iter()
            .map(|period| {
                let mut slice = Slice::new(period.label());
                for metric in Metric::ALL {
                    slice.set(metric, self.get(metric, *period).map(f64::from));
                }
                slice
            })
            .collect()
    }
}
