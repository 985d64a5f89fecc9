//! Copy Button Component
//!
//! Copies a block of text to the clipboard with brief "Copied!" feedback.

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CopyButtonProps {
    /// The text to copy
    pub text: String,
}

#[function_component(CopyButton)]
pub fn copy_button(props: &CopyButtonProps) -> Html {
    let copied = use_state(|| false);

    let on_copy = {
        let text = props.text.clone();
        let copied = copied.clone();

        Callback::from(move |_: MouseEvent| {
            let text = text.clone();
            let copied = copied.clone();

            spawn_local(async move {
                let Some(window) = window() else {
                    return;
                };
                let navigator = window.navigator();
                let clipboard = js_sys::Reflect::get(&navigator, &"clipboard".into())
                    .ok()
                    .and_then(|v| v.dyn_into::<web_sys::Clipboard>().ok());

                let Some(clipboard) = clipboard else {
                    log::warn!("Clipboard API unavailable");
                    return;
                };
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text)).await
                {
                    log::warn!("Copy to clipboard failed: {:?}", e);
                    return;
                }

                copied.set(true);
                let copied_reset = copied.clone();
                Timeout::new(2000, move || {
                    copied_reset.set(false);
                })
                .forget();
            });
        })
    };

    let button_class = classes!("copy-button", (*copied).then_some("copied"));

    html! {
        <button class={button_class} onclick={on_copy} title="Copy to clipboard" type="button">
            { if *copied { "Copied!" } else { "\u{1F4CB} Copy" } }
        </button>
    }
}
