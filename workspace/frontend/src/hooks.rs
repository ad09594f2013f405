use chrono::{DateTime, TimeZone, Utc};
use common::{ComposedForecast, RawForecastPayload};
use compute::composer::ForecastComposer;
use std::fmt::Display;

/// Forecast fetch and composition state
///
/// Transport failures and payload validation failures are kept apart so the
/// dashboard can tell "service down" from "service sent garbage".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ForecastState {
    #[default]
    Loading,
    /// The request never produced a payload
    Unavailable(String),
    /// A payload arrived but failed validation
    Invalid(String),
    Ready {
        composed: ComposedForecast,
        reference_now: DateTime<Utc>,
    },
}

impl ForecastState {
    /// Runs the composer on a fetch outcome.
    pub fn from_fetch<Tz>(
        fetched: Result<RawForecastPayload, String>,
        composer: &ForecastComposer<Tz>,
        reference_now: DateTime<Utc>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let payload = match fetched {
            Ok(payload) => payload,
            Err(err) => return Self::Unavailable(err),
        };

        match composer.compose(&payload, reference_now) {
            Ok(composed) => Self::Ready {
                composed,
                reference_now,
            },
            Err(err) => Self::Invalid(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn composed(&self) -> Option<&ComposedForecast> {
        match self {
            Self::Ready { composed, .. } => Some(composed),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Unavailable(err) | Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}
