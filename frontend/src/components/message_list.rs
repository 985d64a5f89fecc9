//! Chat box: the transcript, or the welcome card when it is empty

use chat_session_lib::{Message, Sender};
use web_sys::Element;
use yew::prelude::*;

use super::Highlighted;

/// Quick options on the welcome card: (label, text placed in the input)
pub const QUICK_OPTIONS: [(&str, &str); 4] = [
    ("Fever", "I have fever"),
    ("Stress", "How to manage stress"),
    ("Sleep", "Sleep tips"),
    ("Diet", "Diet advice"),
];

#[derive(Properties, PartialEq)]
pub struct MessageListProps {
    pub messages: Vec<Message>,
    pub show_welcome: bool,
    /// A quick option was picked
    pub on_prefill: Callback<String>,
}

#[function_component(MessageList)]
pub fn message_list(props: &MessageListProps) -> Html {
    let box_ref = use_node_ref();

    // Keep the newest message in view
    {
        let box_ref = box_ref.clone();
        use_effect_with(props.messages.len(), move |_| {
            if let Some(element) = box_ref.cast::<Element>() {
                element.set_scroll_top(element.scroll_height());
            }
            || ()
        });
    }

    if props.show_welcome {
        return html! {
            <div class="chat-box">
                <div class="welcome-message">
                    <div class="welcome-icon">{ "\u{1F3E5}" }</div>
                    <h2>{ "Welcome to MediChat" }</h2>
                    <p>{ "Ask me about symptoms, diseases, health tips, and more!" }</p>
                    <div class="quick-options">
                        { for QUICK_OPTIONS.iter().map(|(label, text)| {
                            let on_prefill = props.on_prefill.clone();
                            let text = text.to_string();
                            html! {
                                <button
                                    class="quick-btn"
                                    type="button"
                                    onclick={move |_| on_prefill.emit(text.clone())}
                                >
                                    { *label }
                                </button>
                            }
                        }) }
                    </div>
                </div>
            </div>
        };
    }

    html! {
        <div class="chat-box" ref={box_ref}>
            { for props.messages.iter().map(|m| {
                let class = classes!("message", match m.sender() {
                    Sender::User => "user-message",
                    Sender::Bot => "bot-message",
                });
                html! {
                    <div {class}>
                        <div class="message-content">
                            <Highlighted text={AttrValue::from(m.text().to_string())} />
                        </div>
                        <div class="message-time">{ m.timestamp() }</div>
                    </div>
                }
            }) }
        </div>
    }
}
