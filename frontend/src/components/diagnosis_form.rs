//! Structured diagnosis form: symptom, known disease, duration and age

use chat_session_lib::{ChatEvent, DiagnosisForm};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DiagnosisFormViewProps {
    pub validation: Option<String>,
    pub on_event: Callback<ChatEvent>,
}

fn text_field(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

fn number(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[function_component(DiagnosisFormView)]
pub fn diagnosis_form_view(props: &DiagnosisFormViewProps) -> Html {
    let symptom = use_state(String::new);
    let known_disease = use_state(String::new);
    let days = use_state(String::new);
    let age = use_state(String::new);

    let onsubmit = {
        let on_event = props.on_event.clone();
        let (symptom, known_disease, days, age) =
            (symptom.clone(), known_disease.clone(), days.clone(), age.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_event.emit(ChatEvent::SubmitDiagnosisForm(DiagnosisForm {
                symptom: (*symptom).clone(),
                known_disease: (*known_disease).clone(),
                days: number(&days),
                age: number(&age),
            }));
        })
    };

    let onreset = {
        let on_event = props.on_event.clone();
        let fields = [
            symptom.clone(),
            known_disease.clone(),
            days.clone(),
            age.clone(),
        ];
        Callback::from(move |_: MouseEvent| {
            for field in &fields {
                field.set(String::new());
            }
            on_event.emit(ChatEvent::ResetForm);
        })
    };

    html! {
        <form class="diagnosis-form" {onsubmit}>
            <input
                type="text"
                placeholder="Main symptom"
                value={(*symptom).clone()}
                oninput={text_field(&symptom)}
            />
            <input
                type="text"
                placeholder="Known disease (optional)"
                value={(*known_disease).clone()}
                oninput={text_field(&known_disease)}
            />
            <input
                type="number"
                min="1"
                placeholder="Days (default 1)"
                value={(*days).clone()}
                oninput={text_field(&days)}
            />
            <input
                type="number"
                min="0"
                placeholder="Age"
                value={(*age).clone()}
                oninput={text_field(&age)}
            />
            if let Some(message) = &props.validation {
                <div class="validation">{ message }</div>
            }
            <div class="form-actions">
                <button type="submit" class="submit-button">{ "Diagnose" }</button>
                <button type="button" class="reset-button" onclick={onreset}>{ "Reset" }</button>
            </div>
        </form>
    }
}
