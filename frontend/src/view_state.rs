//! Renderable widget state, written by the controller through `Presenter`

use std::time::Duration;

use chat_session_lib::{
    DiagnosisReport, ErrorBanner, FollowupForm, Message, Panel, Preferences, Presenter,
    RecognizedSpeech, VoiceStatus,
};

use crate::speech;

/// What the results region shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Diagnosis(DiagnosisReport),
    Answer(String),
    Clarification(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShownError {
    pub id: u32,
    pub message: String,
}

#[derive(Debug)]
pub struct ViewState {
    pub messages: Vec<Message>,
    pub show_welcome: bool,
    pub result: Option<ResultView>,
    /// A side panel replaces the results region while open
    pub panel: Option<Panel>,
    pub followup: Option<FollowupForm>,
    pub error: Option<ShownError>,
    pub validation: Option<String>,
    pub suggestions: Vec<String>,
    pub input: String,
    pub preferences: Preferences,
    pub voice: VoiceStatus,
    pub recognized: Option<RecognizedSpeech>,
    next_banner_id: u32,
    pending_dismiss: Option<(u32, Duration)>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            show_welcome: true,
            result: None,
            panel: None,
            followup: None,
            error: None,
            validation: None,
            suggestions: Vec::new(),
            input: String::new(),
            preferences: Preferences::default(),
            voice: VoiceStatus::Unsupported,
            recognized: None,
            next_banner_id: 0,
            pending_dismiss: None,
        }
    }
}

impl ViewState {
    /// Banner id and delay for the dismiss timer the widget must schedule
    pub fn take_dismiss_timer(&mut self) -> Option<(u32, Duration)> {
        self.pending_dismiss.take()
    }

    /// Clear the banner unless a newer one replaced it
    pub fn dismiss_error(&mut self, id: u32) -> bool {
        if self.error.as_ref().is_some_and(|e| e.id == id) {
            self.error = None;
            return true;
        }
        false
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }
}

impl Presenter for ViewState {
    fn render_message(&mut self, message: &Message) {
        self.show_welcome = false;
        self.messages.push(message.clone());
    }

    fn render_welcome(&mut self) {
        self.messages.clear();
        self.show_welcome = true;
    }

    fn render_result(&mut self, report: &DiagnosisReport) {
        self.panel = None;
        self.validation = None;
        self.result = Some(ResultView::Diagnosis(report.clone()));
    }

    fn render_answer(&mut self, answer: &str) {
        self.panel = None;
        self.result = Some(ResultView::Answer(answer.to_string()));
    }

    fn render_clarification(&mut self, prompt: &str) {
        self.panel = None;
        self.result = Some(ResultView::Clarification(prompt.to_string()));
    }

    fn render_followup_form(&mut self, form: &FollowupForm) {
        self.validation = None;
        self.followup = Some(form.clone());
    }

    fn close_followup_form(&mut self) {
        self.validation = None;
        self.followup = None;
    }

    fn render_error(&mut self, banner: &ErrorBanner) {
        self.next_banner_id += 1;
        self.error = Some(ShownError {
            id: self.next_banner_id,
            message: banner.message.clone(),
        });
        self.pending_dismiss = Some((self.next_banner_id, banner.dismiss_after));
    }

    fn render_validation(&mut self, message: &str) {
        self.validation = Some(message.to_string());
    }

    fn render_suggestions(&mut self, suggestions: &[String]) {
        self.suggestions = suggestions.to_vec();
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn render_panel(&mut self, panel: &Panel) {
        self.panel = Some(panel.clone());
    }

    fn render_preferences(&mut self, preferences: &Preferences) {
        self.preferences = *preferences;
    }

    fn render_voice_status(&mut self, status: VoiceStatus) {
        self.voice = status;
    }

    fn render_recognized(&mut self, speech: &RecognizedSpeech) {
        self.recognized = Some(speech.clone());
    }

    fn speak(&mut self, text: &str) {
        speech::speak(text);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        gloo::dialogs::confirm(prompt)
    }
}
