use chrono::{DateTime, Local, TimeZone, Utc};
use common::ComposedForecast;
use compute::axis::{
    hourly_ticks, reference_label, reference_position, tick_positions, DEFAULT_HOURS_BEFORE,
    DEFAULT_TICK_COUNT,
};
use plotly::common::{DashType, Fill, Line, Mode};
use plotly::common::TickMode;
use plotly::layout::{Axis, Shape, ShapeLine, ShapeType};
use plotly::{Layout, Scatter};
use std::fmt::Display;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

const CHART_ID: &str = "chart-water-temperature";

/// Plot-ready columns. The x axis is the point position in the series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub x: Vec<usize>,
    pub actual: Vec<Option<f64>>,
    pub forecast: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub tick_values: Vec<f64>,
    pub tick_text: Vec<String>,
    /// Fractional position of the "now" line, if it falls inside the series
    pub now_x: Option<f64>,
    pub now_label: String,
}

impl ChartData {
    pub fn build<Tz>(composed: &ComposedForecast, reference_now: DateTime<Utc>, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let series = &composed.series;
        let ticks = hourly_ticks(reference_now, tz, DEFAULT_HOURS_BEFORE, DEFAULT_TICK_COUNT);
        let (tick_values, tick_text) = tick_positions(series, &ticks)
            .into_iter()
            .map(|(position, label)| (position as f64, label))
            .unzip();

        Self {
            x: (0..series.len()).collect(),
            actual: series.iter().map(|p| p.actual).collect(),
            forecast: series.iter().map(|p| p.forecast).collect(),
            lower: series.iter().map(|p| p.confidence_lower).collect(),
            upper: series.iter().map(|p| p.confidence_upper).collect(),
            tick_values,
            tick_text,
            now_x: reference_position(series, reference_now),
            now_label: reference_label(reference_now, tz),
        }
    }

    pub fn has_band(&self) -> bool {
        self.lower.iter().any(Option::is_some) && self.upper.iter().any(Option::is_some)
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

fn render(div_id: &str, data: &ChartData) -> Result<(), JsValue> {
    let traces = js_sys::Array::new();

    if data.has_band() {
        let lower = Scatter::new(data.x.clone(), data.lower.clone())
            .mode(Mode::Lines)
            .name("Lower bound")
            .show_legend(false)
            .line(Line::new().width(0.0));
        let upper = Scatter::new(data.x.clone(), data.upper.clone())
            .mode(Mode::Lines)
            .name("Confidence band")
            .fill(Fill::ToNextY)
            .fill_color("rgba(249, 115, 22, 0.15)")
            .line(Line::new().width(0.0));
        traces.push(&to_js(&lower)?);
        traces.push(&to_js(&upper)?);
    }

    let actual = Scatter::new(data.x.clone(), data.actual.clone())
        .mode(Mode::Lines)
        .name("Actual")
        .line(Line::new().color("#3b82f6").width(2.0));
    let forecast = Scatter::new(data.x.clone(), data.forecast.clone())
        .mode(Mode::Lines)
        .name("Current Forecast")
        .line(Line::new().color("#f97316").width(2.0).dash(DashType::Dash));
    traces.push(&to_js(&actual)?);
    traces.push(&to_js(&forecast)?);

    let mut layout = Layout::new()
        .height(400)
        .x_axis(
            Axis::new()
                .tick_mode(TickMode::Array)
                .tick_values(data.tick_values.clone())
                .tick_text(data.tick_text.clone())
                .show_grid(false),
        )
        .y_axis(Axis::new().show_grid(true).grid_color("#eee"));

    if let Some(now_x) = data.now_x {
        layout = layout.shapes(vec![Shape::new()
            .shape_type(ShapeType::Line)
            .x_ref("x")
            .y_ref("paper")
            .x0(now_x)
            .x1(now_x)
            .y0(0.0)
            .y1(1.0)
            .line(ShapeLine::new().color("#ef4444").width(2.0).dash(DashType::Dot))]);
    }

    let config = serde_json::json!({"responsive": true, "displayModeBar": false});
    newPlot(div_id, traces.into(), to_js(&layout)?, to_js(&config)?);
    Ok(())
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub composed: ComposedForecast,
    pub reference_now: DateTime<Utc>,
}

#[function_component(ForecastChart)]
pub fn forecast_chart(props: &Props) -> Html {
    let container_ref = use_node_ref();
    let data = ChartData::build(&props.composed, props.reference_now, &Local);
    let now_label = data.now_label.clone();

    use_effect_with((container_ref.clone(), data), move |(container_ref, data)| {
        if let Some(element) = container_ref.cast::<HtmlElement>() {
            element.set_id(CHART_ID);
            if let Err(e) = render(CHART_ID, data) {
                log::error!("Failed to render forecast chart: {:?}", e);
            }
        }
        || ()
    });

    html! {
        <>
            <p class="text-sm text-gray-500">{format!("Now: {}", now_label)}</p>
            <div ref={container_ref} class="chart-container" style="width:100%; height:400px;"></div>
        </>
    }
}
