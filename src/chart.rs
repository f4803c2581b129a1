use crate::models::SeriesPoint;

pub const CHART_WIDTH: f64 = 640.0;
pub const CHART_HEIGHT: f64 = 280.0;
pub const CHART_PADDING: f64 = 40.0;

/// Floor for the y-axis maximum so an empty chart still scales sanely.
const MIN_SCALE: u64 = 5;

/// One positioned bar, ready to serialize as an SVG rect.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// `MM-DD` tick label under the bar.
    pub label: String,
    pub value: u64,
}

/// Lay out proportional bars for the daily visit series.
///
/// Bars share the plot area evenly with a half-bar gap between them and
/// scale linearly against the largest value (never below [`MIN_SCALE`]).
pub fn layout_bars(points: &[SeriesPoint]) -> Vec<Bar> {
    if points.is_empty() {
        return Vec::new();
    }

    let plot_width = CHART_WIDTH - CHART_PADDING * 2.0;
    let plot_height = CHART_HEIGHT - CHART_PADDING * 2.0;
    let bar_width = plot_width / (points.len() as f64 * 1.5);
    let gap = bar_width / 2.0;
    let max_value = points
        .iter()
        .map(|p| p.visits)
        .max()
        .unwrap_or(0)
        .max(MIN_SCALE);

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let height = point.visits as f64 / max_value as f64 * plot_height;
            Bar {
                x: CHART_PADDING + i as f64 * (bar_width + gap) + gap,
                y: CHART_HEIGHT - CHART_PADDING - height,
                width: bar_width,
                height,
                label: day_label(&point.date),
                value: point.visits,
            }
        })
        .collect()
}

/// `2026-08-30` -> `08-30`; shorter stamps pass through untouched.
fn day_label(date: &str) -> String {
    date.get(5..).unwrap_or(date).to_string()
}
