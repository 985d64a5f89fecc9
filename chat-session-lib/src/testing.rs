//! A presenter that records every render call

use crate::message::Message;
use crate::presenter::{ErrorBanner, FollowupForm, Panel, Presenter, RecognizedSpeech, VoiceStatus};
use crate::report::DiagnosisReport;

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Message(Message),
    Welcome,
    Result(DiagnosisReport),
    Answer(String),
    Clarification(String),
    FollowupForm(FollowupForm),
    FollowupClosed,
    Error(ErrorBanner),
    Validation(String),
    Suggestions(Vec<String>),
    Input(String),
    Panel(Panel),
    Voice(VoiceStatus),
    Recognized(RecognizedSpeech),
}

#[derive(Debug)]
pub struct RecordingPresenter {
    pub rendered: Vec<Rendered>,
    pub spoken: Vec<String>,
    /// Answer given to every confirmation prompt
    pub confirm_answer: bool,
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self {
            rendered: Vec::new(),
            spoken: Vec::new(),
            confirm_answer: true,
        }
    }
}

impl RecordingPresenter {
    pub fn last_result(&self) -> Option<&DiagnosisReport> {
        self.rendered.iter().rev().find_map(|r| match r {
            Rendered::Result(report) => Some(report),
            _ => None,
        })
    }

    pub fn last_error(&self) -> Option<&ErrorBanner> {
        self.rendered.iter().rev().find_map(|r| match r {
            Rendered::Error(banner) => Some(banner),
            _ => None,
        })
    }

    /// Texts of rendered chat messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.rendered
            .iter()
            .filter_map(|r| match r {
                Rendered::Message(m) => Some(m.text().to_string()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn render_message(&mut self, message: &Message) {
        self.rendered.push(Rendered::Message(message.clone()));
    }

    fn render_welcome(&mut self) {
        self.rendered.push(Rendered::Welcome);
    }

    fn render_result(&mut self, report: &DiagnosisReport) {
        self.rendered.push(Rendered::Result(report.clone()));
    }

    fn render_answer(&mut self, answer: &str) {
        self.rendered.push(Rendered::Answer(answer.to_string()));
    }

    fn render_clarification(&mut self, prompt: &str) {
        self.rendered.push(Rendered::Clarification(prompt.to_string()));
    }

    fn render_followup_form(&mut self, form: &FollowupForm) {
        self.rendered.push(Rendered::FollowupForm(form.clone()));
    }

    fn close_followup_form(&mut self) {
        self.rendered.push(Rendered::FollowupClosed);
    }

    fn render_error(&mut self, banner: &ErrorBanner) {
        self.rendered.push(Rendered::Error(banner.clone()));
    }

    fn render_validation(&mut self, message: &str) {
        self.rendered.push(Rendered::Validation(message.to_string()));
    }

    fn render_suggestions(&mut self, suggestions: &[String]) {
        self.rendered.push(Rendered::Suggestions(suggestions.to_vec()));
    }

    fn set_input(&mut self, text: &str) {
        self.rendered.push(Rendered::Input(text.to_string()));
    }

    fn render_panel(&mut self, panel: &Panel) {
        self.rendered.push(Rendered::Panel(panel.clone()));
    }

    fn render_voice_status(&mut self, status: VoiceStatus) {
        self.rendered.push(Rendered::Voice(status));
    }

    fn render_recognized(&mut self, speech: &RecognizedSpeech) {
        self.rendered.push(Rendered::Recognized(speech.clone()));
    }

    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.confirm_answer
    }
}
