use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use common::ComposedForecast;
use compute::axis::reference_position;
use compute::composer::ForecastComposer;
use std::fmt::Write;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::client::{ForecastClient, RetryPolicy};

/// Delay before the first retry of a failed fetch.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub url: String,
    pub step_minutes: u32,
    pub retries: u32,
    pub timeout: Duration,
    pub bands: bool,
}

/// Fetches the payload, composes it in the local zone and prints the series.
pub async fn compose(options: &ComposeOptions) -> Result<()> {
    trace!("Entering compose function");
    debug!("Compose options: {:?}", options);

    let client = ForecastClient::new(&options.url, options.timeout)?
        .with_retry(RetryPolicy::new(options.retries, INITIAL_BACKOFF));
    let payload = client
        .fetch()
        .await
        .with_context(|| format!("Forecast unavailable at {}", options.url))?;

    let composer = ForecastComposer::local()
        .with_step_minutes(options.step_minutes)
        .with_confidence_bands(options.bands);
    let now = Utc::now();
    let composed = composer
        .compose(&payload, now)
        .context("Forecast payload rejected")?;

    info!(
        "Composed {} points, latest reading {:?}",
        composed.len(),
        composed.latest_actual
    );
    print!("{}", render_table(&composed, now));
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

/// Plain-text table of the series. The row closest to `reference_now` is
/// marked with `>`.
pub fn render_table(composed: &ComposedForecast, reference_now: DateTime<Utc>) -> String {
    let now_row = reference_position(&composed.series, reference_now).map(|p| p.round() as usize);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "  {:<6} {:>8} {:>8} {:>8} {:>8}",
        "time", "actual", "forecast", "lower", "upper"
    );
    for (index, point) in composed.series.iter().enumerate() {
        let marker = if now_row == Some(index) { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:<6} {:>8} {:>8} {:>8} {:>8}",
            marker,
            point.time,
            cell(point.actual),
            cell(point.forecast),
            cell(point.confidence_lower),
            cell(point.confidence_upper),
        );
    }

    match composed.latest_actual {
        Some(latest) => {
            let _ = writeln!(out, "Current temperature: {:.1}°C", latest);
        }
        None => {
            let _ = writeln!(out, "Current temperature: --°C");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use common::TimeSeriesPoint;

    fn series() -> ComposedForecast {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let at = |i: i64| start + ChronoDuration::minutes(15 * i);
        ComposedForecast::from_series(vec![
            TimeSeriesPoint::historical(at(0), "10:00", Some(60.04)),
            TimeSeriesPoint::historical(at(1), "10:15", None),
            TimeSeriesPoint::forecast(at(2), "10:30", Some(61.26))
                .with_confidence(Some(59.0), Some(63.5)),
        ])
    }

    #[test]
    fn test_render_table_rows_and_latest_reading() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 16, 0).unwrap();
        let table = render_table(&series(), now);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("  10:00"));
        assert!(lines[1].contains("60.0"));
        assert!(lines[2].starts_with("> 10:15"));
        assert!(lines[3].contains("61.3"));
        assert!(lines[3].contains("59.0"));
        assert!(lines[3].contains("63.5"));
        assert_eq!(lines[4], "Current temperature: 60.0°C");
    }

    #[test]
    fn test_render_table_without_readings() {
        let composed = ComposedForecast::from_series(Vec::new());
        let table = render_table(&composed, Utc::now());

        assert_eq!(table.lines().count(), 2);
        assert!(table.ends_with("Current temperature: --°C\n"));
    }

    #[test]
    fn test_now_outside_series_is_not_marked() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let table = render_table(&series(), now);
        assert!(!table.contains('>'));
    }
}
