use yew::prelude::*;

use super::chart::ForecastChart;
use super::stats::TemperatureCard;
use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::use_forecast;
use crate::common::loading::Loading;
use crate::hooks::ForecastState;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let forecast = use_forecast();

    let body = match &*forecast {
        ForecastState::Loading => html! {
            <Loading text={Some("Loading forecast...".to_string())} />
        },
        ForecastState::Unavailable(err) => html! {
            <ErrorDisplay title="Forecast service unavailable" message={err.clone()} />
        },
        ForecastState::Invalid(err) => html! {
            <ErrorDisplay title="Forecast data could not be read" message={err.clone()} />
        },
        ForecastState::Ready { composed, reference_now } => html! {
            <ForecastChart composed={composed.clone()} reference_now={*reference_now} />
        },
    };

    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <TemperatureCard latest_actual={forecast.composed().and_then(|c| c.latest_actual)} />
            </div>
            <div class="card bg-base-100 shadow mt-6">
                <div class="card-body">
                    <h2 class="card-title">{"Water Temperature (History + Forecast)"}</h2>
                    {body}
                </div>
            </div>
        </>
    }
}
