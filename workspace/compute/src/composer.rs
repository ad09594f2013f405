//! Turns a raw forecast-service payload into one chart-ready series.
//!
//! The composer is a pure function of its inputs: the payload, the time zone
//! used for labels, the forecast step and the reference instant. It does no
//! I/O, keeps no state between calls and never panics on malformed input.

use std::fmt::Display;

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use common::{ComposedForecast, ForecastBand, RawForecastPayload, TimeSeriesPoint, latest_actual};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{Result, ValidationError};

/// Spacing between forecast points when the caller does not set one.
pub const DEFAULT_FORECAST_STEP_MINUTES: u32 = 15;

/// Label format for the chart axis.
pub const LABEL_FORMAT: &str = "%H:%M";

/// Composes history and forecast into a single series, labelled in the
/// device's local time zone.
pub fn compose(
    payload: &RawForecastPayload,
    reference_now: DateTime<Utc>,
    forecast_step_minutes: u32,
) -> Result<ComposedForecast> {
    ForecastComposer::local()
        .with_step_minutes(forecast_step_minutes)
        .compose(payload, reference_now)
}

/// Configurable composer. `Tz` decides how instants are labelled and how
/// offset-less timestamps are read.
#[derive(Debug, Clone)]
pub struct ForecastComposer<Tz: TimeZone> {
    tz: Tz,
    step_minutes: u32,
    confidence_bands: bool,
}

impl ForecastComposer<Local> {
    /// Composer labelling in the device's local time zone.
    pub fn local() -> Self {
        Self::new(Local)
    }
}

/// Payload fields after validation.
struct ValidatedPayload {
    instants: Vec<DateTime<Utc>>,
    actual: Vec<Option<f64>>,
    forecast: Vec<Option<f64>>,
    /// Instant the forecast horizon is counted from
    horizon_start: DateTime<Utc>,
}

impl<Tz> ForecastComposer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            step_minutes: DEFAULT_FORECAST_STEP_MINUTES,
            confidence_bands: false,
        }
    }

    pub fn with_step_minutes(mut self, step_minutes: u32) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    /// Copies the lower/upper bands onto forecast points when the payload
    /// carries them. Off by default.
    pub fn with_confidence_bands(mut self, enabled: bool) -> Self {
        self.confidence_bands = enabled;
        self
    }

    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Formats an instant as an `HH:MM` label in the composer's time zone.
    pub fn label(&self, instant: &DateTime<Utc>) -> String {
        instant.with_timezone(&self.tz).format(LABEL_FORMAT).to_string()
    }

    /// Validates `payload` and builds the composed series.
    ///
    /// `reference_now` anchors the forecast horizon only when the payload has
    /// no history; otherwise the horizon starts one step after the last
    /// observed timestamp.
    #[instrument(skip_all, fields(step_minutes = self.step_minutes))]
    pub fn compose(
        &self,
        payload: &RawForecastPayload,
        reference_now: DateTime<Utc>,
    ) -> Result<ComposedForecast> {
        let validated = self.validate(payload, reference_now).inspect_err(|err| {
            warn!(field = err.field(), %err, "Rejecting forecast payload");
        })?;

        let mut series = Vec::with_capacity(validated.instants.len() + validated.forecast.len());

        // Historical segment, order as given
        for (instant, actual) in validated.instants.iter().zip(&validated.actual) {
            series.push(TimeSeriesPoint::historical(
                *instant,
                self.label(instant),
                *actual,
            ));
        }

        // Forecast segment, one step after the last observation
        let start = validated.horizon_start;
        let (lower, upper) = if self.confidence_bands {
            (
                payload.band_values(ForecastBand::Lower),
                payload.band_values(ForecastBand::Upper),
            )
        } else {
            (None, None)
        };
        let bound_at = |band: &Option<Vec<Option<f64>>>, index: usize| {
            band.as_ref().and_then(|values| values.get(index).copied().flatten())
        };

        for (index, value) in validated.forecast.iter().enumerate() {
            let offset = i64::from(self.step_minutes) * (index as i64 + 1);
            let instant = start + Duration::minutes(offset);
            let point = TimeSeriesPoint::forecast(instant, self.label(&instant), *value)
                .with_confidence(bound_at(&lower, index), bound_at(&upper, index));
            series.push(point);
        }

        let latest = latest_actual(&series);
        debug!(
            history = validated.instants.len(),
            horizon = validated.forecast.len(),
            latest_actual = ?latest,
            "Composed forecast series"
        );

        Ok(ComposedForecast {
            series,
            latest_actual: latest,
        })
    }

    fn validate(
        &self,
        payload: &RawForecastPayload,
        reference_now: DateTime<Utc>,
    ) -> Result<ValidatedPayload> {
        if self.step_minutes == 0 {
            return Err(ValidationError::InvalidStep(self.step_minutes));
        }

        let timestamps = payload
            .timestamps
            .as_ref()
            .ok_or(ValidationError::MissingField("timestamps"))?;
        let actual = payload
            .actual
            .as_ref()
            .ok_or(ValidationError::MissingField("actual"))?;
        if payload.forecast.is_none() {
            return Err(ValidationError::MissingField("forecast"));
        }

        if timestamps.len() != actual.len() {
            return Err(ValidationError::LengthMismatch {
                timestamps: timestamps.len(),
                actual: actual.len(),
            });
        }

        let instants = timestamps
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                self.parse_instant(raw)
                    .ok_or_else(|| ValidationError::InvalidTimestamp {
                        index,
                        value: raw.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        // Duplicates count as out of order
        if let Some(index) = instants.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(ValidationError::NonAscendingTimestamps {
                index: index + 1,
                previous: timestamps[index].clone(),
                current: timestamps[index + 1].clone(),
            });
        }

        let forecast = point_forecast_values(payload)?;

        // Earlier horizon offsets are smaller, so checking the last one covers all
        let horizon_start = instants.last().copied().unwrap_or(reference_now);
        let horizon_end = i64::from(self.step_minutes)
            .checked_mul(forecast.len() as i64)
            .and_then(TimeDelta::try_minutes)
            .and_then(|span| horizon_start.checked_add_signed(span));
        if horizon_end.is_none() {
            return Err(ValidationError::HorizonOverflow {
                step_minutes: self.step_minutes,
                steps: forecast.len(),
            });
        }

        Ok(ValidatedPayload {
            instants,
            actual: actual.clone(),
            forecast,
            horizon_start,
        })
    }

    /// Accepts RFC 3339 instants, and offset-less date-times which are read
    /// as wall-clock time in the composer's zone.
    fn parse_instant(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(instant.with_timezone(&Utc));
        }

        let naive = raw.replacen(' ', "T", 1).parse::<NaiveDateTime>().ok()?;
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }
}

/// Reads the point-forecast row; `null` entries stay absent.
fn point_forecast_values(payload: &RawForecastPayload) -> Result<Vec<Option<f64>>> {
    let band = ForecastBand::Point;

    let row = match payload.point_forecast() {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingForecastBand {
                band: band.name(),
                index: band.index(),
            });
        }
        Some(row) => row,
    };
    let values = row.as_array().ok_or(ValidationError::InvalidForecastBand {
        band: band.name(),
        index: band.index(),
    })?;

    if values.is_empty() {
        return Err(ValidationError::EmptyForecast { band: band.name() });
    }

    values
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Null => Ok(None),
            Value::Number(number) => Ok(number.as_f64()),
            _ => Err(ValidationError::InvalidForecastValue { index }),
        })
        .collect()
}
