use yew::prelude::*;
use super::navbar::Navbar;
use super::sidebar::{use_sidebar, Sidebar};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: String,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    let sidebar = use_sidebar("Layout");
    let collapsed = (!sidebar.open()).then_some("sidebar-collapsed");

    html! {
        <div class="flex min-h-screen">
            <Sidebar />
            <div class={classes!("flex", "flex-col", "flex-1", "bg-base-200", "transition-all", "duration-300", collapsed)}>
                <Navbar title={props.title.clone()} />
                <main class="flex-1 p-6 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}
