use shared::humanize_symptom;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SuggestionListProps {
    /// Backend symptom tokens
    pub suggestions: Vec<String>,
    pub on_pick: Callback<usize>,
}

#[function_component(SuggestionList)]
pub fn suggestion_list(props: &SuggestionListProps) -> Html {
    if props.suggestions.is_empty() {
        return html! {};
    }

    html! {
        <ul class="suggestions">
            { for props.suggestions.iter().enumerate().map(|(index, token)| {
                let on_pick = props.on_pick.clone();
                html! {
                    <li class="suggestion-item" onclick={move |_| on_pick.emit(index)}>
                        { humanize_symptom(token) }
                    </li>
                }
            }) }
        </ul>
    }
}
