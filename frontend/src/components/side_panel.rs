//! Health tips and chat history panels

use chat_session_lib::Panel;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SidePanelProps {
    pub panel: Panel,
}

#[function_component(SidePanel)]
pub fn side_panel(props: &SidePanelProps) -> Html {
    match &props.panel {
        Panel::HealthTips(tips) => html! {
            <div class="result-card tips">
                { for tips.iter().map(|tip| html! {
                    <div class="result-section tip">
                        <div class="result-label">{ tip.icon }{ " " }{ tip.title }</div>
                        <div class="result-value">{ tip.text }</div>
                    </div>
                }) }
            </div>
        },
        Panel::History(entries) if entries.is_empty() => html! {
            <div class="result-card history empty">{ "No chat history yet" }</div>
        },
        Panel::History(entries) => html! {
            <div class="result-card history">
                { for entries.iter().map(|entry| html! {
                    <div class="history-item">
                        <span class="history-sender">{ entry.sender.as_str() }</span>
                        <span class="history-time">{ &entry.timestamp }</span>
                        <div class="history-text">{ &entry.preview }</div>
                    </div>
                }) }
            </div>
        },
    }
}
