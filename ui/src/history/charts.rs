use dioxus::prelude::*;

use crate::core::aggregate::{DailyAverage, TrailingComparison, Trend};
use crate::core::chart::{layout, ChartConfig, ChartLayout, PlotLayout, Vertex};
use crate::core::format::{format_average, format_delta};
use crate::history::palette;
use crate::i18n::tr_metric;
use crate::t;

/// Width used until the first resize observation arrives.
const FALLBACK_WIDTH: f64 = 640.0;

/// Current 7-day mean per metric against the 7 days before.
#[component]
pub fn SummaryCards(comparisons: Vec<TrailingComparison>) -> Element {
    let colors = palette();

    rsx! {
        section { class: "summary-cards",
            for comparison in comparisons.into_iter() {
                {summary_card(comparison, colors.color(comparison.metric))}
            }
        }
    }
}

fn summary_card(comparison: TrailingComparison, color: &'static str) -> Element {
    let (marker, trend_class) = match comparison.trend() {
        Some(Trend::Up) => ("▲", "summary-card__delta--up"),
        Some(Trend::Down) => ("▼", "summary-card__delta--down"),
        Some(Trend::Flat) => ("■", "summary-card__delta--flat"),
        None => ("", "summary-card__delta--none"),
    };

    rsx! {
        div {
            key: "{comparison.metric.key()}",
            class: "summary-card",
            style: "--metric-color:{color}",
            span { class: "summary-card__label", {tr_metric(comparison.metric)} }
            strong { class: "summary-card__value", {format_average(comparison.current)} }
            span { class: "summary-card__meta",
                {t!("summary-previous", value = format_average(comparison.previous))}
            }
            span { class: "summary-card__delta {trend_class}",
                "{marker} "
                {format_delta(comparison.delta)}
            }
        }
    }
}

/// Daily averages over time. The chart follows its container's width.
#[component]
pub fn TrendChart(entries: Vec<DailyAverage>, #[props(default = 220.0)] height: f64) -> Element {
    let mut width = use_signal(|| Option::<f64>::None);
    let config = ChartConfig::default();
    let chart = layout(&entries, width().unwrap_or(FALLBACK_WIDTH), height, &config);

    let body = match chart {
        ChartLayout::Placeholder => rsx! {
            p { class: "card__placeholder", {t!("chart-placeholder")} }
        },
        ChartLayout::Plot(plot) => render_plot(plot),
    };

    rsx! {
        section { class: "card trend-chart",
            div { class: "card__header",
                h2 { class: "section-title", {t!("chart-title")} }
            }
            div {
                class: "trend-chart__frame",
                onresize: move |evt: ResizeEvent| {
                    if let Ok(size) = evt.data().get_content_box_size() {
                        if size.width > 0.0 {
                            width.set(Some(size.width));
                        }
                    }
                },
                {body}
            }
        }
    }
}

fn render_plot(plot: PlotLayout) -> Element {
    let colors = palette();
    let w = plot.width;
    let h = plot.height;
    let label_x = plot.left - 6.0;
    let axis_y = plot.bottom + 16.0;
    let legend = plot.legend();
    let gridlines: Vec<_> = plot
        .gridlines
        .iter()
        .map(|grid| (grid.clone(), grid.y + 3.0))
        .collect();

    rsx! {
        svg {
            class: "trend-chart__svg",
            width: "{w}",
            height: "{h}",
            view_box: "0 0 {w} {h}",
            role: "img",
            "aria-label": t!("chart-title"),

            for (grid, text_y) in gridlines.iter() {
                line {
                    key: "g{grid.value}",
                    x1: "{plot.left}",
                    x2: "{plot.right}",
                    y1: "{grid.y}",
                    y2: "{grid.y}",
                    stroke: colors.grid,
                    stroke_width: "1",
                }
                text {
                    key: "gl{grid.value}",
                    x: "{label_x}",
                    y: "{text_y}",
                    fill: colors.text,
                    font_size: "10",
                    text_anchor: "end",
                    "{grid.label}"
                }
            }

            for series in plot.series.iter() {
                if series.vertices.len() > 1 {
                    polyline {
                        key: "l{series.metric.key()}",
                        points: series.polyline_points(),
                        fill: "none",
                        stroke: colors.color(series.metric),
                        stroke_width: "2",
                        stroke_linejoin: "round",
                        stroke_linecap: "round",
                    }
                }
                for vertex in series.vertices.iter() {
                    circle {
                        key: "p{series.metric.key()}{vertex.date}",
                        cx: "{vertex.x}",
                        cy: "{vertex.y}",
                        r: "3",
                        fill: colors.color(series.metric),
                        title { {point_title(series.metric, vertex)} }
                    }
                }
            }

            for label in plot.x_labels.iter() {
                text {
                    key: "x{label.text}",
                    x: "{label.x}",
                    y: "{axis_y}",
                    fill: colors.text,
                    font_size: "10",
                    text_anchor: "middle",
                    "{label.text}"
                }
            }
        }

        ul { class: "trend-chart__legend",
            for metric in legend {
                li { key: "{metric.key()}",
                    span {
                        class: "trend-chart__swatch",
                        style: "background:{colors.color(metric)}",
                    }
                    {tr_metric(metric)}
                }
            }
        }
    }
}

fn point_title(metric: api::Metric, vertex: &Vertex) -> String {
    format!(
        "{} {}: {}",
        tr_metric(metric),
        vertex.date,
        format_average(Some(vertex.value))
    )
}
