//! Render commands the controller sends to a UI.
//!
//! The browser widget and the terminal client each implement [`Presenter`].

use std::time::Duration;

use crate::message::Message;
use crate::preferences::Preferences;
use crate::report::{DiagnosisReport, HealthTip, HistoryEntry};
use crate::voice::VoiceState;

/// How long a transient error banner stays up
pub const ERROR_BANNER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub dismiss_after: Duration,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            dismiss_after: ERROR_BANNER_TIMEOUT,
        }
    }
}

/// The follow-up questionnaire: one free-text answer per question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowupForm {
    pub disease: Option<String>,
    pub questions: Vec<String>,
}

/// Side panels other than results
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    HealthTips(&'static [HealthTip]),
    /// Newest first; empty means "No chat history yet"
    History(Vec<HistoryEntry>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceStatus {
    /// Hide the microphone affordance
    Unsupported,
    Active(VoiceState),
}

/// What the speech engine heard, for the feedback strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizedSpeech {
    Interim(String),
    Final(String),
    Error(String),
}

pub trait Presenter {
    /// Append a message to the chat box
    fn render_message(&mut self, message: &Message);

    /// Replace the chat box with the welcome state
    fn render_welcome(&mut self);

    /// Show a resolved diagnosis in the results region
    fn render_result(&mut self, report: &DiagnosisReport);

    /// Show a Q&A answer in the results region
    fn render_answer(&mut self, answer: &str);

    /// Ask the user to restate symptoms instead of showing a result
    fn render_clarification(&mut self, prompt: &str);

    fn render_followup_form(&mut self, form: &FollowupForm);

    fn close_followup_form(&mut self);

    /// Transient banner, dismissed after `banner.dismiss_after`
    fn render_error(&mut self, banner: &ErrorBanner);

    /// Inline message next to the input that was rejected
    fn render_validation(&mut self, message: &str);

    /// Replace the suggestion list; empty clears it
    fn render_suggestions(&mut self, suggestions: &[String]);

    /// Replace the contents of the symptom input
    fn set_input(&mut self, text: &str);

    fn render_panel(&mut self, panel: &Panel);

    fn render_preferences(&mut self, _preferences: &Preferences) {}

    fn render_voice_status(&mut self, _status: VoiceStatus) {}

    fn render_recognized(&mut self, _speech: &RecognizedSpeech) {}

    /// Text-to-speech output
    fn speak(&mut self, _text: &str) {}

    /// Blocking yes/no confirmation
    fn confirm(&mut self, prompt: &str) -> bool;
}
