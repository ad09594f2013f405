use thiserror::Error;

/// Reasons a forecast payload is rejected by the composer.
///
/// Every variant names the offending field so the caller can report the
/// failure once, in full, without re-inspecting the payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required top-level field is absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// `timestamps` and `actual` disagree in length
    #[error("Length mismatch: {timestamps} timestamps but {actual} actual values")]
    LengthMismatch { timestamps: usize, actual: usize },

    /// A timestamp is not a parseable ISO-8601 instant
    #[error("Invalid timestamp at index {index}: {value:?}")]
    InvalidTimestamp { index: usize, value: String },

    /// Timestamps repeat or go backwards
    #[error("Timestamps not strictly ascending at index {index}: {current:?} does not follow {previous:?}")]
    NonAscendingTimestamps {
        index: usize,
        previous: String,
        current: String,
    },

    /// The selected forecast row is absent or `null`
    #[error("Missing forecast band '{band}' at index {index}")]
    MissingForecastBand { band: &'static str, index: usize },

    /// The selected forecast row is present but not an array
    #[error("Forecast band '{band}' at index {index} is not an array")]
    InvalidForecastBand { band: &'static str, index: usize },

    /// The selected forecast row holds no values
    #[error("Forecast band '{band}' is empty")]
    EmptyForecast { band: &'static str },

    /// A forecast entry is neither a number nor `null`
    #[error("Forecast value at index {index} is not a number")]
    InvalidForecastValue { index: usize },

    /// The forecast step is not a positive number of minutes
    #[error("Forecast step must be positive, got {0} minutes")]
    InvalidStep(u32),

    /// The last forecast instant falls outside the representable time range
    #[error("Forecast horizon of {steps} steps of {step_minutes} minutes is out of range")]
    HorizonOverflow { step_minutes: u32, steps: usize },
}

impl ValidationError {
    /// Name of the payload field (or setting) that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::LengthMismatch { .. } => "actual",
            ValidationError::InvalidTimestamp { .. }
            | ValidationError::NonAscendingTimestamps { .. } => "timestamps",
            ValidationError::MissingForecastBand { .. }
            | ValidationError::InvalidForecastBand { .. }
            | ValidationError::EmptyForecast { .. }
            | ValidationError::InvalidForecastValue { .. } => "forecast",
            ValidationError::InvalidStep(_) | ValidationError::HorizonOverflow { .. } => {
                "forecastStepMinutes"
            }
        }
    }
}

/// Error types for the forecasting models
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Not enough history to fit the model
    #[error("Insufficient data: required {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A model parameter is out of range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The context contains NaN or infinite values
    #[error("Non-finite value in context at index {0}")]
    NonFiniteValue(usize),
}

/// Type alias for Result with ValidationError
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Type alias for Result with ForecastError
pub type ForecastResult<T> = std::result::Result<T, ForecastError>;
