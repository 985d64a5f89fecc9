use chat_session_lib::{ChatEvent, FollowupForm};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FollowupFormViewProps {
    pub form: FollowupForm,
    pub validation: Option<String>,
    pub on_event: Callback<ChatEvent>,
}

#[function_component(FollowupFormView)]
pub fn followup_form_view(props: &FollowupFormViewProps) -> Html {
    let onsubmit = {
        let on_event = props.on_event.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_event.emit(ChatEvent::SubmitFollowup);
        })
    };

    html! {
        <form class="followup-form" {onsubmit}>
            <h3>{ "A few more questions" }</h3>
            if let Some(disease) = &props.form.disease {
                <p class="followup-hint">{ format!("Checking for {}", disease) }</p>
            }
            { for props.form.questions.iter().enumerate().map(|(index, question)| {
                let on_event = props.on_event.clone();
                let oninput = Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_event.emit(ChatEvent::FollowupAnswerChanged {
                        index,
                        answer: input.value(),
                    });
                });
                html! {
                    <label class="followup-question">
                        <span>{ question }</span>
                        <input type="text" {oninput} />
                    </label>
                }
            }) }
            if let Some(message) = &props.validation {
                <div class="validation">{ message }</div>
            }
            <button type="submit" class="submit-button">{ "Submit answers" }</button>
        </form>
    }
}
