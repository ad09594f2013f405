//! Common transport-layer types shared between backend and frontend.
//! The forecast service serializes [`RawForecastPayload`]; the dashboard
//! deserializes the same shape and composes it into a [`ComposedForecast`].

mod payload;
mod series;

pub use payload::{ForecastBand, RawForecastPayload};
pub use series::{latest_actual, ComposedForecast, TimeSeriesPoint};
