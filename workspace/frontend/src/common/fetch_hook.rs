use chrono::Utc;
use compute::composer::ForecastComposer;
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

use crate::api_client::forecast::fetch_forecast;
use crate::hooks::ForecastState;
use crate::settings;

/// Fetches the forecast once on mount and composes it on arrival.
///
/// A response that lands after the owning component unmounted is dropped
/// instead of being written to stale state.
#[hook]
pub fn use_forecast() -> UseStateHandle<ForecastState> {
    let state = use_state(ForecastState::default);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            let alive = Rc::new(Cell::new(true));
            let settings = settings::get_settings();
            let composer = ForecastComposer::local()
                .with_step_minutes(settings.forecast_step_minutes)
                .with_confidence_bands(settings.show_confidence_band);

            {
                let alive = alive.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let fetched = fetch_forecast().await;
                    if !alive.get() {
                        log::debug!("Forecast arrived after unmount, discarding");
                        return;
                    }

                    let next = ForecastState::from_fetch(fetched, &composer, Utc::now());
                    match &next {
                        ForecastState::Unavailable(err) => log::error!("Forecast unavailable: {}", err),
                        ForecastState::Invalid(err) => log::error!("Forecast payload rejected: {}", err),
                        ForecastState::Ready { composed, .. } => {
                            log::info!("Forecast composed with {} points", composed.len())
                        }
                        ForecastState::Loading => {}
                    }
                    state.set(next);
                });
            }

            move || alive.set(false)
        });
    }

    state
}
