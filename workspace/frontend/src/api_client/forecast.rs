use common::RawForecastPayload;

use super::get_json;
use crate::settings;

/// Fetch the raw forecast payload from the configured endpoint
pub async fn fetch_forecast() -> Result<RawForecastPayload, String> {
    let url = settings::get_settings().forecast_url;
    get_json(&url).await
}
