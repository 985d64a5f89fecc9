//! Voice Input Button
//!
//! Microphone toggle for continuous speech recognition. Hidden entirely
//! when the browser has no recognition engine.

use chat_session_lib::{VoiceState, VoiceStatus};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VoiceButtonProps {
    pub status: VoiceStatus,
    pub on_toggle: Callback<()>,
}

#[function_component(VoiceButton)]
pub fn voice_button(props: &VoiceButtonProps) -> Html {
    let VoiceStatus::Active(state) = props.status else {
        return html! {};
    };

    let listening = state == VoiceState::Listening;
    let stopping = state == VoiceState::Stopping;
    let button_class = classes!(
        "voice-button",
        listening.then_some("active"),
        stopping.then_some("stopping"),
    );

    let title = match state {
        VoiceState::Idle => "Start voice input",
        VoiceState::Listening => "Stop voice input",
        VoiceState::Stopping => "Stopping...",
    };

    let on_toggle = props.on_toggle.clone();
    html! {
        <button
            class={button_class}
            onclick={move |_| on_toggle.emit(())}
            disabled={stopping}
            title={title}
            type="button"
        >
            if listening {
                <span class="voice-icon recording-icon">{ "\u{1F534}" }</span>
            } else {
                <span class="voice-icon mic-icon">{ "\u{1F3A4}" }</span>
            }
        </button>
    }
}
