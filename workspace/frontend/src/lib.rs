use yew::prelude::*;
use yew_router::prelude::*;

mod components;
pub mod api_client;
pub mod common;
pub mod hooks;
pub mod settings;
pub mod state;

use components::dashboard::Dashboard;
use components::layout::layout::Layout;
use components::layout::sidebar::SidebarProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Dashboard => {
            log::trace!("Rendering Dashboard page");
            html! { <Layout title="Water Temperature"><Dashboard /></Layout> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"404 Not Found"}</h1></Layout> }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let default_open = settings::get_settings().sidebar_default_open;

    html! {
        <SidebarProvider {default_open}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </SidebarProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Tempcast Dashboard Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Forecast URL: {}", settings.forecast_url);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
