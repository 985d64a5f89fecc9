//! Text with medical terms highlighted

use chat_session_lib::highlight_terms;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HighlightedProps {
    pub text: AttrValue,
}

#[function_component(Highlighted)]
pub fn highlighted(props: &HighlightedProps) -> Html {
    highlight_terms(&props.text)
        .into_iter()
        .map(|segment| {
            if segment.highlighted {
                html! { <span class="medical-term">{ segment.text }</span> }
            } else {
                html! { { segment.text } }
            }
        })
        .collect::<Html>()
}
