//! ChatWidget component - the whole MediChat widget
//!
//! Owns the `ChatController` and a `ViewState` presenter. Every UI event is
//! routed through the controller; its effects become spawned requests,
//! recognizer calls and timers whose results come back as messages.

use chat_session_lib::{
    perform, Capabilities, ChatController, ChatEvent, Effect, RecognizedSpeech, Tab, Theme,
    VoiceEvent, VoiceState, VoiceStatus,
};
use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use super::{
    DiagnosisFormView, FollowupFormView, MessageList, ResultPanel, SidePanel, SuggestionList,
    VoiceButton,
};
use crate::api::WasmApiClient;
use crate::speech::{self, SpeechRecognizer};
use crate::storage::LocalStore;
use crate::view_state::ViewState;

pub enum ChatWidgetMsg {
    /// Anything the controller handles
    Chat(ChatEvent),
    /// Keystroke in the chat input
    UpdateInput(String),
    /// Put text in the input without looking up suggestions
    Prefill(String),
    SendInput,
    DismissError(u32),
}

pub struct ChatWidget {
    controller: ChatController<LocalStore>,
    view: ViewState,
    api: WasmApiClient,
    recognizer: Option<SpeechRecognizer>,
}

impl ChatWidget {
    fn dispatch(&mut self, ctx: &Context<Self>, event: ChatEvent) {
        if matches!(event, ChatEvent::ShowTab(Tab::Diagnosis)) {
            self.view.close_panel();
        }

        let effects = self.controller.handle(event, &mut self.view);

        if let Some((id, after)) = self.view.take_dismiss_timer() {
            let link = ctx.link().clone();
            Timeout::new(after.as_millis() as u32, move || {
                link.send_message(ChatWidgetMsg::DismissError(id));
            })
            .forget();
        }

        for effect in effects {
            self.run_effect(ctx, effect);
        }
    }

    fn run_effect(&mut self, ctx: &Context<Self>, effect: Effect) {
        match effect {
            Effect::Request(request) => {
                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let completion = perform(&api, request).await;
                    link.send_message(ChatWidgetMsg::Chat(completion));
                });
            }
            Effect::StartListening => {
                if let Some(recognizer) = &self.recognizer {
                    if let Err(e) = recognizer.start() {
                        log::error!("Failed to start speech recognition: {}", e);
                        ctx.link().send_message(ChatWidgetMsg::Chat(ChatEvent::Voice(
                            VoiceEvent::StartFailed(e),
                        )));
                    }
                }
            }
            Effect::StopListening => {
                if let Some(recognizer) = &self.recognizer {
                    recognizer.stop();
                }
            }
            Effect::RestartListening { after } => {
                let link = ctx.link().clone();
                Timeout::new(after.as_millis() as u32, move || {
                    link.send_message(ChatWidgetMsg::Chat(ChatEvent::Voice(VoiceEvent::RestartDue)));
                })
                .forget();
            }
        }
    }

    fn chat_callback<F>(ctx: &Context<Self>, f: F) -> Callback<MouseEvent>
    where
        F: Fn() -> ChatEvent + 'static,
    {
        ctx.link().callback(move |_: MouseEvent| ChatWidgetMsg::Chat(f()))
    }

    fn view_header(&self, ctx: &Context<Self>) -> Html {
        let prefs = &self.view.preferences;
        let voice_label = if prefs.voice_enabled {
            "\u{1F50A} Voice on"
        } else {
            "\u{1F507} Voice off"
        };
        let theme_label = match prefs.theme {
            Theme::Dark => "\u{2600}\u{FE0F} Light",
            Theme::Light => "\u{1F319} Dark",
        };

        html! {
            <header class="chat-header">
                <h1>{ "\u{1F3E5} MediChat" }</h1>
                <div class="header-actions">
                    <button type="button" onclick={Self::chat_callback(ctx, || ChatEvent::ToggleVoiceOutput)}>
                        { voice_label }
                    </button>
                    <button type="button" onclick={Self::chat_callback(ctx, || ChatEvent::ToggleTheme)}>
                        { theme_label }
                    </button>
                    <button type="button" onclick={Self::chat_callback(ctx, || ChatEvent::ClearHistory)}>
                        { "\u{1F5D1}\u{FE0F} Clear" }
                    </button>
                </div>
            </header>
        }
    }

    fn view_tabs(&self, ctx: &Context<Self>) -> Html {
        let tab = |label: &'static str, tab: Tab| {
            html! {
                <button type="button" class="tab" onclick={Self::chat_callback(ctx, move || ChatEvent::ShowTab(tab))}>
                    { label }
                </button>
            }
        };
        html! {
            <nav class="tabs">
                { tab("Diagnosis", Tab::Diagnosis) }
                { tab("Health Tips", Tab::HealthTips) }
                { tab("History", Tab::History) }
            </nav>
        }
    }

    fn view_input(&self, ctx: &Context<Self>) -> Html {
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ChatWidgetMsg::UpdateInput(input.value())
        });
        let onkeypress = ctx.link().batch_callback(|e: KeyboardEvent| {
            (e.key() == "Enter").then_some(ChatWidgetMsg::SendInput)
        });
        let on_pick = ctx
            .link()
            .callback(|index: usize| ChatWidgetMsg::Chat(ChatEvent::SuggestionPicked(index)));
        let on_voice = ctx
            .link()
            .callback(|_: ()| ChatWidgetMsg::Chat(ChatEvent::Voice(VoiceEvent::Toggle)));

        let listening = self.view.voice == VoiceStatus::Active(VoiceState::Listening);
        let feedback = self.view.recognized.as_ref().filter(|_| listening).map(|speech| {
            match speech {
                RecognizedSpeech::Interim(text) => format!("\u{1F4DD} {}", text),
                RecognizedSpeech::Final(text) => format!("\u{2705} {}", text),
                RecognizedSpeech::Error(code) => format!("\u{274C} Error: {}", code),
            }
        });

        html! {
            <div class="input-area">
                if listening {
                    <div class="voice-feedback">
                        <span class="listening-dot" />
                        <span class="recognized-text">{ feedback.unwrap_or_else(|| "Listening...".to_string()) }</span>
                    </div>
                }
                <div class="input-row">
                    <input
                        type="text"
                        class="symptom-input"
                        placeholder="Describe your symptoms or ask a health question..."
                        value={self.view.input.clone()}
                        {oninput}
                        {onkeypress}
                    />
                    <VoiceButton status={self.view.voice} on_toggle={on_voice} />
                    <button type="button" class="send-button" onclick={ctx.link().callback(|_: MouseEvent| ChatWidgetMsg::SendInput)}>
                        { "Send" }
                    </button>
                </div>
                <SuggestionList suggestions={self.view.suggestions.clone()} {on_pick} />
            </div>
        }
    }

    fn view_results(&self, ctx: &Context<Self>) -> Html {
        let on_event = ctx.link().callback(ChatWidgetMsg::Chat);
        let on_read = ctx
            .link()
            .callback(|text: String| ChatWidgetMsg::Chat(ChatEvent::ReadAloud(text)));

        let form = match &self.view.followup {
            Some(form) => html! {
                <FollowupFormView
                    form={form.clone()}
                    validation={self.view.validation.clone()}
                    on_event={on_event.clone()}
                />
            },
            None => html! {
                <DiagnosisFormView validation={self.view.validation.clone()} {on_event} />
            },
        };

        let region = if let Some(panel) = &self.view.panel {
            html! { <SidePanel panel={panel.clone()} /> }
        } else if let Some(result) = &self.view.result {
            html! { <ResultPanel result={result.clone()} {on_read} /> }
        } else {
            html! {}
        };

        html! {
            <section class="results">
                { form }
                { region }
            </section>
        }
    }
}

impl Component for ChatWidget {
    type Message = ChatWidgetMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let recognizer = if speech::recognition_supported() {
            SpeechRecognizer::new(
                ctx.link()
                    .callback(|event: VoiceEvent| ChatWidgetMsg::Chat(ChatEvent::Voice(event))),
            )
        } else {
            log::warn!("Speech recognition not supported");
            None
        };

        let capabilities = Capabilities {
            speech_input: recognizer.is_some(),
            speech_output: speech::synthesis_supported(),
        };

        let mut controller = ChatController::new(LocalStore::new(), capabilities);
        let mut view = ViewState::default();
        controller.start(&mut view);

        Self {
            controller,
            view,
            api: WasmApiClient::same_origin(),
            recognizer,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ChatWidgetMsg::Chat(event) => {
                self.dispatch(ctx, event);
                true
            }
            ChatWidgetMsg::UpdateInput(text) => {
                self.view.input = text.clone();
                self.dispatch(ctx, ChatEvent::SymptomInputChanged(text));
                true
            }
            ChatWidgetMsg::Prefill(text) => {
                self.view.input = text;
                true
            }
            ChatWidgetMsg::SendInput => {
                let text = self.view.input.clone();
                self.dispatch(ctx, ChatEvent::Submit(text));
                true
            }
            ChatWidgetMsg::DismissError(id) => self.view.dismiss_error(id),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let theme_class = match self.view.preferences.theme {
            Theme::Dark => "dark-theme",
            Theme::Light => "light-theme",
        };
        let on_prefill = ctx.link().callback(ChatWidgetMsg::Prefill);

        html! {
            <div class={classes!("medichat", theme_class)}>
                { self.view_header(ctx) }
                if let Some(error) = &self.view.error {
                    <div class="error-banner">{ &error.message }</div>
                }
                { self.view_tabs(ctx) }
                <main class="chat-layout">
                    <section class="conversation">
                        <MessageList
                            messages={self.view.messages.clone()}
                            show_welcome={self.view.show_welcome}
                            {on_prefill}
                        />
                        { self.view_input(ctx) }
                    </section>
                    { self.view_results(ctx) }
                </main>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.recognizer = None;
    }
}
