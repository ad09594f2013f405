use yew::prelude::*;

/// Latest reading rounded to whole degrees, or a dash when there is none.
pub fn format_temperature(latest_actual: Option<f64>) -> String {
    match latest_actual {
        Some(value) => format!("{:.0}°C", value.round()),
        None => "–".to_string(),
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub latest_actual: Option<f64>,
}

#[function_component(TemperatureCard)]
pub fn temperature_card(props: &Props) -> Html {
    html! {
        <div class="stats shadow bg-base-100">
            <div class="stat">
                <div class="stat-figure text-primary">
                    <i class="fas fa-temperature-half text-3xl"></i>
                </div>
                <div class="stat-title">{"Current water temperature"}</div>
                <div class="stat-value text-primary">{format_temperature(props.latest_actual)}</div>
                <div class="stat-desc">{"Latest sensor reading"}</div>
            </div>
        </div>
    }
}
