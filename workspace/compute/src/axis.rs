//! Axis helpers for the forecast chart.
//!
//! Tick and "now" marker placement is positional: ticks are matched to
//! series indices through instants, never through label strings.

use std::fmt::Display;

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use common::TimeSeriesPoint;

use crate::composer::LABEL_FORMAT;

/// Hours of history shown before the reference instant.
pub const DEFAULT_HOURS_BEFORE: i64 = 12;

/// Number of hourly ticks on the axis.
pub const DEFAULT_TICK_COUNT: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub instant: DateTime<Utc>,
    pub label: String,
}

/// Hourly ticks starting `hours_before` hours before `reference_now`,
/// aligned to the top of the hour in `tz`.
pub fn hourly_ticks<Tz>(
    reference_now: DateTime<Utc>,
    tz: &Tz,
    hours_before: i64,
    count: usize,
) -> Vec<AxisTick>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = reference_now.with_timezone(tz);
    let aligned = local
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(local);
    let first = aligned - Duration::hours(hours_before);

    (0..count)
        .map(|hour| {
            let tick = first.clone() + Duration::hours(hour as i64);
            AxisTick {
                instant: tick.with_timezone(&Utc),
                label: tick.format(LABEL_FORMAT).to_string(),
            }
        })
        .collect()
}

/// Label for the "now" marker.
pub fn reference_label<Tz>(reference_now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    reference_now.with_timezone(tz).format(LABEL_FORMAT).to_string()
}

/// Maps each tick to the first series position at or after its instant.
/// Ticks outside the series span are dropped.
pub fn tick_positions(series: &[TimeSeriesPoint], ticks: &[AxisTick]) -> Vec<(usize, String)> {
    let Some(last) = series.last() else {
        return Vec::new();
    };

    ticks
        .iter()
        .filter(|tick| tick.instant >= series[0].instant && tick.instant <= last.instant)
        .filter_map(|tick| {
            let position = series.partition_point(|point| point.instant < tick.instant);
            (position < series.len()).then(|| (position, tick.label.clone()))
        })
        .collect()
}

/// Fractional series position of `reference_now`, interpolated between the
/// surrounding points. `None` when it falls outside the series.
pub fn reference_position(series: &[TimeSeriesPoint], reference_now: DateTime<Utc>) -> Option<f64> {
    let first = series.first()?;
    let last = series.last()?;
    if reference_now < first.instant || reference_now > last.instant {
        return None;
    }

    let after = series.partition_point(|point| point.instant < reference_now);
    if series[after].instant == reference_now || after == 0 {
        return Some(after as f64);
    }

    let before = &series[after - 1];
    let span = (series[after].instant - before.instant).num_seconds() as f64;
    let elapsed = (reference_now - before.instant).num_seconds() as f64;
    Some((after - 1) as f64 + elapsed / span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn quarter_hour_series(start: &str, len: usize) -> Vec<TimeSeriesPoint> {
        let start = at(start);
        (0..len)
            .map(|i| {
                let instant = start + Duration::minutes(15 * i as i64);
                TimeSeriesPoint::placeholder(instant, instant.format(LABEL_FORMAT).to_string())
            })
            .collect()
    }

    #[test]
    fn test_hourly_ticks_start_twelve_hours_back_on_the_hour() {
        let ticks = hourly_ticks(
            at("2024-01-01T14:37:12Z"),
            &Utc,
            DEFAULT_HOURS_BEFORE,
            DEFAULT_TICK_COUNT,
        );

        assert_eq!(ticks.len(), 24);
        assert_eq!(ticks[0].label, "02:00");
        assert_eq!(ticks[12].label, "14:00");
        assert_eq!(ticks[23].label, "01:00");
        assert!(ticks.windows(2).all(|w| w[1].instant - w[0].instant == Duration::hours(1)));
    }

    #[test]
    fn test_hourly_ticks_use_local_zone() {
        let india = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let ticks = hourly_ticks(at("2024-01-01T00:10:00Z"), &india, 1, 2);

        // 05:40 local, aligned to 05:00, minus one hour
        assert_eq!(ticks[0].label, "04:00");
        assert_eq!(ticks[1].label, "05:00");
        assert_eq!(ticks[1].instant, at("2023-12-31T23:30:00Z"));
    }

    #[test]
    fn test_reference_label_formats_hours_and_minutes() {
        assert_eq!(reference_label(at("2024-01-01T09:05:59Z"), &Utc), "09:05");
    }

    #[test]
    fn test_tick_positions_are_positional() {
        // Crosses midnight twice, so labels repeat
        let series = quarter_hour_series("2024-01-01T23:00:00Z", 4 * 26);
        let ticks = hourly_ticks(at("2024-01-02T12:00:00Z"), &Utc, 13, 26);

        let positions = tick_positions(&series, &ticks);
        assert_eq!(positions.first(), Some(&(0, "23:00".to_string())));
        assert_eq!(positions[1], (4, "00:00".to_string()));
        assert!(positions.windows(2).all(|w| w[0].0 < w[1].0));

        let midnights: Vec<_> = positions.iter().filter(|(_, l)| l == "00:00").collect();
        assert_eq!(midnights.len(), 2);
        assert_ne!(midnights[0].0, midnights[1].0);
    }

    #[test]
    fn test_tick_positions_drop_ticks_outside_series() {
        let series = quarter_hour_series("2024-01-01T10:00:00Z", 5);
        let ticks = hourly_ticks(at("2024-01-01T10:00:00Z"), &Utc, 2, 5);

        let positions = tick_positions(&series, &ticks);
        assert_eq!(
            positions,
            vec![(0, "10:00".to_string()), (4, "11:00".to_string())]
        );
        assert!(tick_positions(&[], &ticks).is_empty());
    }

    #[test]
    fn test_reference_position_interpolates() {
        let series = quarter_hour_series("2024-01-01T10:00:00Z", 5);

        assert_eq!(reference_position(&series, at("2024-01-01T10:00:00Z")), Some(0.0));
        assert_eq!(reference_position(&series, at("2024-01-01T10:30:00Z")), Some(2.0));
        assert_eq!(reference_position(&series, at("2024-01-01T10:37:30Z")), Some(2.5));
        assert_eq!(reference_position(&series, at("2024-01-01T09:59:00Z")), None);
        assert_eq!(reference_position(&series, at("2024-01-01T11:01:00Z")), None);
        assert_eq!(reference_position(&[], at("2024-01-01T10:00:00Z")), None);
    }
}
