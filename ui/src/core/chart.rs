//! Trend chart layout: daily averages in, SVG-ready geometry out.
//!
//! Missing points are skipped. Every plottable date gets an x slot shared by
//! all metrics, and each metric's line connects only the dates where it has a
//! value, so a gap in one metric never breaks another.

use std::fmt::Write;

use api::Metric;
use time::{macros::format_description, Date};

use crate::core::aggregate::DailyAverage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub padding: ChartPadding,
    /// Fixed value scale. Averages outside it are drawn on the edge.
    pub value_min: f64,
    pub value_max: f64,
    pub gridlines: Vec<f64>,
    pub max_x_labels: usize,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: ChartPadding {
                top: 16.0,
                right: 16.0,
                bottom: 28.0,
                left: 32.0,
            },
            value_min: 1.0,
            value_max: 10.0,
            gridlines: vec![2.0, 4.0, 6.0, 8.0, 10.0],
            max_x_labels: 6,
            min_width: 240.0,
            min_height: 160.0,
        }
    }
}

/// Colors used when rendering standalone SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPalette {
    pub background: &'static str,
    pub grid: &'static str,
    pub text: &'static str,
    pub mood: &'static str,
    pub energy: &'static str,
    pub anxiety: &'static str,
}

impl ChartPalette {
    pub fn color(&self, metric: Metric) -> &'static str {
        match metric {
            Metric::Mood => self.mood,
            Metric::Energy => self.energy,
            Metric::Anxiety => self.anxiety,
        }
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            background: "#0f1116",
            grid: "rgba(245,247,251,0.12)",
            text: "rgba(245,247,251,0.72)",
            mood: "#6366f1",
            energy: "#22d3ee",
            anxiety: "#f472b6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub date: Date,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    pub metric: Metric,
    pub vertices: Vec<Vertex>,
}

impl SeriesLine {
    /// `points` attribute for an SVG `<polyline>`.
    pub fn polyline_points(&self) -> String {
        self.vertices
            .iter()
            .map(|v| format!("{:.1},{:.1}", v.x, v.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub x: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub series: Vec<SeriesLine>,
    pub gridlines: Vec<Gridline>,
    pub x_labels: Vec<AxisLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartLayout {
    /// Fewer than two plottable dates.
    Placeholder,
    Plot(PlotLayout),
}

/// Lay out `entries` in a `width × height` box.
pub fn layout(entries: &[DailyAverage], width: f64, height: f64, config: &ChartConfig) -> ChartLayout {
    let mut plottable: Vec<&DailyAverage> = entries
        .iter()
        .filter(|entry| Metric::ALL.iter().any(|m| finite(entry.get(*m)).is_some()))
        .collect();
    if plottable.len() < 2 {
        return ChartLayout::Placeholder;
    }
    plottable.sort_by_key(|entry| entry.date);

    let width = clamp_size(width, config.min_width);
    let height = clamp_size(height, config.min_height);
    let pad = config.padding;
    let left = pad.left;
    let right = (width - pad.right).max(left + 1.0);
    let top = pad.top;
    let bottom = (height - pad.bottom).max(top + 1.0);

    let last = (plottable.len() - 1) as f64;
    let x_at = |idx: usize| left + idx as f64 / last * (right - left);
    let span = if config.value_max > config.value_min {
        config.value_max - config.value_min
    } else {
        1.0
    };
    let y_at = |value: f64| {
        let clamped = value.clamp(config.value_min, config.value_min + span);
        top + (1.0 - (clamped - config.value_min) / span) * (bottom - top)
    };

    let series = Metric::ALL
        .iter()
        .map(|metric| SeriesLine {
            metric: *metric,
            vertices: plottable
                .iter()
                .enumerate()
                .filter_map(|(idx, entry)| {
                    finite(entry.get(*metric)).map(|value| Vertex {
                        x: x_at(idx),
                        y: y_at(value),
                        date: entry.date,
                        value,
                    })
                })
                .collect(),
        })
        .filter(|line| !line.vertices.is_empty())
        .collect();

    let gridlines = config
        .gridlines
        .iter()
        .filter(|value| value.is_finite())
        .map(|value| Gridline {
            value: *value,
            y: y_at(*value),
            label: format!("{value}"),
        })
        .collect();

    let stride = plottable.len().div_ceil(config.max_x_labels.max(1)).max(1);
    let x_labels = plottable
        .iter()
        .enumerate()
        .step_by(stride)
        .map(|(idx, entry)| AxisLabel {
            x: x_at(idx),
            text: short_date(entry.date),
        })
        .collect();

    ChartLayout::Plot(PlotLayout {
        width,
        height,
        left,
        right,
        top,
        bottom,
        series,
        gridlines,
        x_labels,
    })
}

impl PlotLayout {
    /// Metrics that have at least one vertex, in display order.
    pub fn legend(&self) -> Vec<Metric> {
        self.series.iter().map(|line| line.metric).collect()
    }

    /// Standalone SVG document (used for PNG export).
    pub fn to_svg(&self, palette: &ChartPalette) -> String {
        let mut out = String::new();
        match self.write_svg(&mut out, palette) {
            Ok(()) => out,
            Err(_) => String::new(),
        }
    }

    fn write_svg(&self, out: &mut String, palette: &ChartPalette) -> std::fmt::Result {
        let (w, h) = (self.width, self.height);
        write!(
            out,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w:.0}' height='{h:.0}' viewBox='0 0 {w:.0} {h:.0}'>"
        )?;
        write!(out, "<rect width='{w:.0}' height='{h:.0}' fill='{}'/>", palette.background)?;

        for grid in &self.gridlines {
            write!(
                out,
                "<line x1='{:.1}' x2='{:.1}' y1='{y:.1}' y2='{y:.1}' stroke='{}' stroke-width='1'/>",
                self.left,
                self.right,
                palette.grid,
                y = grid.y
            )?;
            write!(
                out,
                "<text x='{:.1}' y='{:.1}' fill='{}' font-family='sans-serif' font-size='10' text-anchor='end'>{}</text>",
                self.left - 6.0,
                grid.y + 3.0,
                palette.text,
                grid.label
            )?;
        }

        for line in &self.series {
            let color = palette.color(line.metric);
            if line.vertices.len() > 1 {
                write!(
                    out,
                    "<polyline points='{}' fill='none' stroke='{color}' stroke-width='2' stroke-linejoin='round' stroke-linecap='round'/>",
                    line.polyline_points()
                )?;
            }
            for vertex in &line.vertices {
                write!(
                    out,
                    "<circle cx='{:.1}' cy='{:.1}' r='3' fill='{color}'/>",
                    vertex.x, vertex.y
                )?;
            }
        }

        for label in &self.x_labels {
            write!(
                out,
                "<text x='{:.1}' y='{:.1}' fill='{}' font-family='sans-serif' font-size='10' text-anchor='middle'>{}</text>",
                label.x,
                self.bottom + 16.0,
                palette.text,
                label.text
            )?;
        }

        let mut x = self.left;
        for metric in self.legend() {
            write!(
                out,
                "<rect x='{x:.1}' y='4' width='10' height='4' fill='{}'/><text x='{:.1}' y='10' fill='{}' font-family='sans-serif' font-size='10'>{}</text>",
                palette.color(metric),
                x + 14.0,
                palette.text,
                metric.label()
            )?;
            x += 72.0;
        }

        out.push_str("</svg>");
        Ok(())
    }
}

/// `Jan 5` style date label.
pub fn short_date(date: Date) -> String {
    date.format(format_description!("[month repr:short] [day padding:none]"))
        .unwrap_or_else(|_| date.to_string())
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn clamp_size(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.max(min)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn day(date: Date, mood: Option<f64>) -> DailyAverage {
        DailyAverage {
            date,
            mood,
            energy: None,
            anxiety: None,
        }
    }

    fn plot(layout: ChartLayout) -> PlotLayout {
        match layout {
            ChartLayout::Plot(plot) => plot,
            ChartLayout::Placeholder => panic!("expected a plot"),
        }
    }

    #[test]
    fn three_days_are_evenly_spaced_with_higher_values_higher() {
        let entries = vec![
            day(date!(2024 - 01 - 01), Some(5.0)),
            day(date!(2024 - 01 - 02), Some(7.0)),
            day(date!(2024 - 01 - 03), Some(6.0)),
        ];
        let plot = plot(layout(&entries, 400.0, 200.0, &ChartConfig::default()));
        assert_eq!(plot.series.len(), 1);

        let v = &plot.series[0].vertices;
        assert_eq!(v.len(), 3);
        assert!((v[1].x - v[0].x - (v[2].x - v[1].x)).abs() < 1e-9);
        assert_eq!(v[0].x, plot.left);
        assert_eq!(v[2].x, plot.right);
        // Screen y grows downward: 7 above 6 above 5.
        assert!(v[1].y < v[2].y);
        assert!(v[2].y < v[0].y);
        assert_eq!(plot.legend(), vec![Metric::Mood]);
    }

    #[test]
    fn single_entry_is_a_placeholder() {
        let entries = vec![day(date!(2024 - 01 - 01), Some(5.0))];
        assert_eq!(
            layout(&entries, 400.0, 200.0, &ChartConfig::default()),
            ChartLayout::Placeholder
        );
    }

    #[test]
    fn empty_days_do_not_count_as_points() {
        let entries = vec![
            day(date!(2024 - 01 - 01), Some(5.0)),
            day(date!(2024 - 01 - 02), None),
        ];
        assert_eq!(
            layout(&entries, 400.0, 200.0, &ChartConfig::default()),
            ChartLayout::Placeholder
        );
    }

    #[test]
    fn missing_metric_values_are_skipped_not_zeroed() {
        let mut entries = vec![
            day(date!(2024 - 01 - 01), Some(4.0)),
            day(date!(2024 - 01 - 02), None),
            day(date!(2024 - 01 - 03), Some(8.0)),
        ];
        entries[1].energy = Some(6.0);

        let plot = plot(layout(&entries, 400.0, 200.0, &ChartConfig::default()));
        let mood = plot
            .series
            .iter()
            .find(|line| line.metric == Metric::Mood)
            .unwrap();
        let energy = plot
            .series
            .iter()
            .find(|line| line.metric == Metric::Energy)
            .unwrap();

        assert_eq!(mood.vertices.len(), 2);
        assert_eq!(mood.vertices[1].x, plot.right);
        assert_eq!(energy.vertices.len(), 1);
        let mid = (plot.left + plot.right) / 2.0;
        assert!((energy.vertices[0].x - mid).abs() < 1e-9);
        assert_eq!(mood.polyline_points().split(' ').count(), 2);
    }

    #[test]
    fn out_of_scale_values_sit_on_the_edge() {
        let entries = vec![
            day(date!(2024 - 01 - 01), Some(14.0)),
            day(date!(2024 - 01 - 02), Some(-3.0)),
        ];
        let plot = plot(layout(&entries, 400.0, 200.0, &ChartConfig::default()));
        let v = &plot.series[0].vertices;
        assert_eq!(v[0].y, plot.top);
        assert_eq!(v[1].y, plot.bottom);
        // The raw average is kept for tooltips.
        assert_eq!(v[0].value, 14.0);
    }

    #[test]
    fn x_labels_are_thinned() {
        let start = date!(2024 - 01 - 01);
        let entries: Vec<DailyAverage> = (0..20)
            .map(|offset| day(start + time::Duration::days(offset), Some(5.0)))
            .collect();
        let plot = plot(layout(&entries, 600.0, 200.0, &ChartConfig::default()));
        assert!(plot.x_labels.len() <= 6);
        assert_eq!(plot.x_labels[0].text, "Jan 1");
    }

    #[test]
    fn narrow_boxes_fall_back_to_minimum_size() {
        let entries = vec![
            day(date!(2024 - 01 - 01), Some(5.0)),
            day(date!(2024 - 01 - 02), Some(6.0)),
        ];
        let config = ChartConfig::default();
        let plot = plot(layout(&entries, f64::NAN, 10.0, &config));
        assert_eq!(plot.width, config.min_width);
        assert_eq!(plot.height, config.min_height);
    }

    #[test]
    fn svg_contains_one_polyline_per_multi_point_series() {
        let entries = vec![
            day(date!(2024 - 01 - 01), Some(5.0)),
            day(date!(2024 - 01 - 02), Some(6.0)),
        ];
        let svg = plot(layout(&entries, 400.0, 200.0, &ChartConfig::default()))
            .to_svg(&ChartPalette::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains("#6366f1"));
    }
}
