mod api;
mod components;
mod speech;
mod storage;
pub mod utils;
mod view_state;

use components::ChatWidget;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! { <ChatWidget /> }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
