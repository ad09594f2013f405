use yew::prelude::*;
use yew_router::prelude::*;

use crate::state::sidebar::{require_provider, SidebarAction, SidebarState};
use crate::Route;

/// Read and mutate access to the sidebar flag.
///
/// Wraps the reducer so descendants can only go through `toggle` and
/// `set_open`.
#[derive(Clone, PartialEq)]
pub struct SidebarHandle {
    state: UseReducerHandle<SidebarState>,
}

impl SidebarHandle {
    pub fn open(&self) -> bool {
        self.state.open()
    }

    pub fn toggle(&self) {
        self.state.dispatch(SidebarAction::Toggle);
    }

    pub fn set_open(&self, open: bool) {
        self.state.dispatch(SidebarAction::SetOpen(open));
    }
}

#[derive(Properties, PartialEq)]
pub struct SidebarProviderProps {
    #[prop_or(true)]
    pub default_open: bool,
    pub children: Children,
}

#[function_component(SidebarProvider)]
pub fn sidebar_provider(props: &SidebarProviderProps) -> Html {
    let default_open = props.default_open;
    let state = use_reducer(move || SidebarState::new(default_open));
    let handle = SidebarHandle { state };

    html! {
        <ContextProvider<SidebarHandle> context={handle}>
            { for props.children.iter() }
        </ContextProvider<SidebarHandle>>
    }
}

/// Sidebar handle of the nearest provider.
///
/// Panics with "`component` must be used within SidebarProvider" when there
/// is none.
#[hook]
pub fn use_sidebar(component: &'static str) -> SidebarHandle {
    require_provider(use_context::<SidebarHandle>(), component)
}

#[function_component(SidebarTrigger)]
pub fn sidebar_trigger() -> Html {
    let sidebar = use_sidebar("SidebarTrigger");
    let label = if sidebar.open() { "collapse sidebar" } else { "expand sidebar" };

    let onclick = {
        let sidebar = sidebar.clone();
        Callback::from(move |_: MouseEvent| {
            log::debug!("Sidebar trigger clicked");
            sidebar.toggle();
        })
    };

    html! {
        <button aria-label={label} class="btn btn-square btn-ghost" {onclick}>
            <i class="fas fa-bars text-xl"></i>
        </button>
    }
}

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let sidebar = use_sidebar("Sidebar");
    let open = sidebar.open();

    let width = if open { "w-64" } else { "w-16" };
    let close = {
        let sidebar = sidebar.clone();
        Callback::from(move |_: MouseEvent| sidebar.set_open(false))
    };

    html! {
        <aside class={classes!("min-h-full", "bg-base-100", "border-r", "border-base-300", "transition-all", "duration-300", width)}>
            <ul class="menu p-4 w-full">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content font-bold text-2xl">
                            <i class="fas fa-temperature-half"></i>
                        </div>
                        if open {
                            <span class="text-2xl font-bold tracking-tight">{"Tempcast"}</span>
                        }
                    </div>
                </li>

                <li>
                    <Link<Route> to={Route::Dashboard} classes="nav-link">
                        <i class="fas fa-chart-line w-5"></i>
                        if open { {" Water temperature"} }
                    </Link<Route>>
                </li>

                if open {
                    <>
                        <div class="divider"></div>
                        <li>
                            <a class="nav-link" onclick={close}>
                                <i class="fas fa-angles-left w-5"></i>{" Collapse"}
                            </a>
                        </li>
                    </>
                }
            </ul>
        </aside>
    }
}
