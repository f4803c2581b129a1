use crate::models::{AppData, SeriesPoint};

/// Completed days kept in the rolling series.
pub const SERIES_CAP: usize = 7;

/// Record one visit for `today` (a `YYYY-MM-DD` string).
///
/// When the stored day stamp differs from `today`, the previous day's
/// running count is pushed onto the series first and today's count starts
/// over. The rollover happens at most once per call, and only when the
/// stamp actually changed.
pub fn record_visit(data: &mut AppData, today: &str) {
    if !data.day_stamp.is_empty() && data.day_stamp != today {
        let closed = SeriesPoint {
            date: std::mem::take(&mut data.day_stamp),
            visits: data.today_visits,
        };
        data.series.push(closed);
        truncate_front(&mut data.series, SERIES_CAP);
        data.today_visits = 0;
    }

    data.total_visits = data.total_visits.saturating_add(1);
    data.today_visits = data.today_visits.saturating_add(1);
    data.day_stamp = today.to_string();
}

/// Points for the dashboard chart: the last six completed days plus a
/// synthetic point for the current day's running count. Oldest first,
/// never more than seven entries.
///
/// A stale day stamp (the day changed but nothing recorded it yet) is
/// treated as if the rollover had already happened, so read-only callers
/// see the same picture a visit would produce.
pub fn chart_series(data: &AppData, today: &str) -> Vec<SeriesPoint> {
    let mut completed = data.series.clone();
    let mut running = data.today_visits;
    if !data.day_stamp.is_empty() && data.day_stamp != today {
        completed.push(SeriesPoint {
            date: data.day_stamp.clone(),
            visits: running,
        });
        running = 0;
    }

    let tail = completed.len().saturating_sub(SERIES_CAP - 1);
    let mut points = completed.split_off(tail);
    points.push(SeriesPoint {
        date: today.to_string(),
        visits: running,
    });
    points
}

fn truncate_front(series: &mut Vec<SeriesPoint>, cap: usize) {
    if series.len() > cap {
        series.drain(..series.len() - cap);
    }
}
