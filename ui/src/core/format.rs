//! Formatting helpers for presenting averages and deltas.

/// Shown wherever a value is missing.
pub const NO_DATA: &str = "—";

/// One decimal place, or the no-data dash.
pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.1}"),
        _ => NO_DATA.to_string(),
    }
}

/// Signed delta with one decimal place (`+1.5`, `-0.3`, `0.0`).
pub fn format_delta(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => {
            // Avoid printing "-0.0" for tiny negative deltas.
            let rounded = (value * 10.0).round() / 10.0;
            if rounded > 0.0 {
                format!("+{rounded:.1}")
            } else if rounded < 0.0 {
                format!("{rounded:.1}")
            } else {
                "0.0".to_string()
            }
        }
        _ => NO_DATA.to_string(),
    }
}

pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.0}%")
    } else {
        NO_DATA.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_and_deltas() {
        assert_eq!(format_average(Some(5.25)), "5.2");
        assert_eq!(format_average(Some(6.0)), "6.0");
        assert_eq!(format_average(None), NO_DATA);
        assert_eq!(format_delta(Some(1.46)), "+1.5");
        assert_eq!(format_delta(Some(-0.02)), "0.0");
        assert_eq!(format_delta(Some(-2.0)), "-2.0");
        assert_eq!(format_delta(None), NO_DATA);
        assert_eq!(format_percent(50.0), "50%");
    }
}
