pub mod forecast;

use gloo_net::http::Request;
use serde::Deserialize;

/// GET `url` and decode the JSON body as-is.
///
/// Transport failures, non-2xx statuses and undecodable bodies all come back
/// as a message string; the body is never partially applied.
pub async fn get_json<T>(url: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    log::debug!("GET request to: {}", url);

    let response = Request::get(url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", url, error_msg);
        error_msg
    })?;

    if !response.ok() {
        let error_msg = format!("HTTP error: {}", response.status());
        log::error!("GET {} - {}", url, error_msg);
        return Err(error_msg);
    }

    log::trace!("GET {} - Response received, parsing JSON", url);
    let body: T = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("GET {} - {}", url, error_msg);
        error_msg
    })?;

    log::info!("GET {} - Success", url);
    Ok(body)
}
