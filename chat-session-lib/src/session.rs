//! The chat session controller.
//!
//! UI events go in through [`ChatController::handle`]; render commands go
//! out through a [`Presenter`] and collaborator work comes back as
//! [`Effect`]s for the caller to run. Network completions are fed back in as
//! events, in whatever order they finish.

use std::collections::BTreeMap;
use std::time::Duration;

use shared::protocol::UNKNOWN_DISEASE;
use shared::{
    humanize_symptom, ApiError, DiagnoseRequest, DiagnoseResponse, FollowupRequest,
    FollowupResponse, HealthQaRequest, HealthQaResponse, SuggestRequest,
};
use tracing::{debug, warn};

use crate::message::Message;
use crate::preferences::Preferences;
use crate::presenter::{ErrorBanner, FollowupForm, Panel, Presenter, RecognizedSpeech, VoiceStatus};
use crate::report::{history_entries, DiagnosisReport, HEALTH_TIPS};
use crate::router::{self, Intent};
use crate::storage::KeyValueStore;
use crate::transcript::{Transcript, TRANSCRIPT_CAPACITY};
use crate::voice::{VoiceAction, VoiceEvent, VoiceInput, VoiceState};

pub const DIAGNOSIS_APOLOGY: &str = "An error occurred during diagnosis. Please try again.";
pub const QA_APOLOGY: &str = "Sorry, I could not answer that question. Please try rephrasing.";
pub const CLARIFICATION_PROMPT: &str =
    "Please describe your symptoms more clearly. Example: \"I have fever, cough and headache\"";
pub const FOLLOWUP_ERROR: &str = "Could not submit your answers. Please try again.";
pub const EMPTY_FORM_MESSAGE: &str = "Please enter a symptom or disease";
pub const INCOMPLETE_FOLLOWUP_MESSAGE: &str = "Please answer all follow-up questions";
pub const CLEAR_HISTORY_PROMPT: &str = "Clear all chat history?";
pub const VOICE_GAVE_UP_MESSAGE: &str =
    "Voice input stopped after repeated errors. Click the microphone to try again.";

/// Partial input shorter than this clears suggestions without a lookup
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// Duration sent with the structured form when the user leaves it blank
pub const DEFAULT_DURATION_DAYS: u32 = 1;

/// What the running environment can do, detected once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub speech_input: bool,
    pub speech_output: bool,
}

/// The structured diagnosis form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosisForm {
    pub symptom: String,
    /// Overrides the symptom when set
    pub known_disease: String,
    pub days: Option<u32>,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Diagnosis,
    HealthTips,
    History,
}

/// Diagnosis flow a request was issued in. A reset starts a new flow, so
/// completions tagged with an older one are dropped.
pub type FlowId = u64;

/// A collaborator call. Requests are never cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Diagnose(FlowId, DiagnoseRequest),
    Followup(FlowId, FollowupRequest),
    HealthQa(HealthQaRequest),
    Suggest(SuggestRequest),
}

/// Work the caller performs on the controller's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request(ApiRequest),
    StartListening,
    StopListening,
    /// Send `VoiceEvent::RestartDue` once `after` has elapsed
    RestartListening { after: Duration },
}

/// Inbound messages: UI events and collaborator completions
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Send button / Enter in the chat box
    Submit(String),
    SubmitDiagnosisForm(DiagnosisForm),
    DiagnosisCompleted(FlowId, Result<DiagnoseResponse, ApiError>),
    FollowupAnswerChanged { index: usize, answer: String },
    SubmitFollowup,
    FollowupCompleted(FlowId, Result<FollowupResponse, ApiError>),
    QaCompleted(Result<HealthQaResponse, ApiError>),
    SymptomInputChanged(String),
    SuggestionsReceived(Result<Vec<String>, ApiError>),
    SuggestionPicked(usize),
    ClearHistory,
    ResetForm,
    ShowTab(Tab),
    /// Explicit "Read" button; speaks even with voice output off
    ReadAloud(String),
    ToggleVoiceOutput,
    ToggleTheme,
    Voice(VoiceEvent),
}

/// Follow-up questions awaiting answers. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingFollowup {
    pub disease: Option<String>,
    pub questions: Vec<String>,
    /// Uncommitted answers, index-aligned with `questions`
    pub answers: Vec<String>,
}

impl PendingFollowup {
    fn new(disease: Option<String>, questions: Vec<String>) -> Self {
        let answers = vec![String::new(); questions.len()];
        Self {
            disease,
            questions,
            answers,
        }
    }

    fn form(&self) -> FollowupForm {
        FollowupForm {
            disease: self.disease.clone(),
            questions: self.questions.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosisSession {
    /// Current flow; survives resets, which bump it
    pub flow: FlowId,
    /// What the user described last; re-run by the Diagnosis tab
    pub last_symptom_input: Option<String>,
    pub last_request: Option<DiagnoseRequest>,
    /// Age from the structured form, forwarded with follow-up answers
    pub age: Option<u32>,
    pub pending_followup: Option<PendingFollowup>,
}

/// How a diagnosis response should be handled
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosisOutcome {
    /// The backend refused the input and said why
    Rejected(String),
    FollowupRequired {
        disease: Option<String>,
        questions: Vec<String>,
    },
    Resolved(String),
    Unrecognized,
}

impl DiagnosisOutcome {
    pub fn of(resp: &DiagnoseResponse) -> Self {
        if let Some(error) = resp.error.as_deref().filter(|e| !e.trim().is_empty()) {
            return DiagnosisOutcome::Rejected(error.to_string());
        }

        if !resp.followup.is_empty() {
            return DiagnosisOutcome::FollowupRequired {
                disease: resp.disease.clone(),
                questions: resp.followup.clone(),
            };
        }

        match resp.disease.as_deref().map(str::trim) {
            Some(disease) if !disease.is_empty() && disease != UNKNOWN_DISEASE => {
                DiagnosisOutcome::Resolved(disease.to_string())
            }
            _ => DiagnosisOutcome::Unrecognized,
        }
    }
}

pub struct ChatController<S: KeyValueStore> {
    store: S,
    capabilities: Capabilities,
    transcript: Transcript,
    preferences: Preferences,
    session: DiagnosisSession,
    voice: VoiceInput,
    suggestions: Vec<String>,
}

impl<S: KeyValueStore> ChatController<S> {
    /// Load preferences and the persisted transcript from `store`
    pub fn new(store: S, capabilities: Capabilities) -> Self {
        let transcript = Transcript::load(&store);
        let preferences = Preferences::load(&store);
        debug!(
            "Loaded {} transcript messages (voice output: {}, theme: {})",
            transcript.len(),
            preferences.voice_enabled,
            preferences.theme.as_str()
        );

        Self {
            store,
            capabilities,
            transcript,
            preferences,
            session: DiagnosisSession::default(),
            voice: VoiceInput::new(capabilities.speech_input),
            suggestions: Vec::new(),
        }
    }

    /// Replay the transcript and push initial state to the presenter
    pub fn start(&mut self, view: &mut dyn Presenter) {
        if self.transcript.is_empty() {
            view.render_welcome();
        } else {
            for message in self.transcript.messages() {
                view.render_message(message);
            }
        }
        view.render_preferences(&self.preferences);
        view.render_voice_status(self.voice_status());
    }

    pub fn handle(&mut self, event: ChatEvent, view: &mut dyn Presenter) -> Vec<Effect> {
        match event {
            ChatEvent::Submit(text) => self.submit(&text, view),
            ChatEvent::SubmitDiagnosisForm(form) => self.submit_form(form, view),
            ChatEvent::DiagnosisCompleted(flow, result) => {
                if flow != self.session.flow {
                    debug!("Discarding diagnosis completion from abandoned flow {}", flow);
                    return Vec::new();
                }
                self.diagnosis_completed(result, view);
                Vec::new()
            }
            ChatEvent::FollowupAnswerChanged { index, answer } => {
                if let Some(answer_slot) = self
                    .session
                    .pending_followup
                    .as_mut()
                    .and_then(|p| p.answers.get_mut(index))
                {
                    *answer_slot = answer;
                }
                Vec::new()
            }
            ChatEvent::SubmitFollowup => self.submit_followup(view),
            ChatEvent::FollowupCompleted(flow, result) => {
                if flow != self.session.flow {
                    debug!("Discarding follow-up completion from abandoned flow {}", flow);
                    return Vec::new();
                }
                self.followup_completed(result, view);
                Vec::new()
            }
            ChatEvent::QaCompleted(result) => {
                self.qa_completed(result, view);
                Vec::new()
            }
            ChatEvent::SymptomInputChanged(text) => {
                if text.chars().count() < MIN_SUGGESTION_CHARS {
                    self.clear_suggestions(view);
                    return Vec::new();
                }
                vec![Effect::Request(ApiRequest::Suggest(SuggestRequest { text }))]
            }
            ChatEvent::SuggestionsReceived(result) => {
                match result {
                    Ok(suggestions) => self.suggestions = suggestions,
                    Err(e) => {
                        warn!("Symptom suggestion lookup failed: {}", e);
                        self.suggestions.clear();
                    }
                }
                view.render_suggestions(&self.suggestions);
                Vec::new()
            }
            ChatEvent::SuggestionPicked(index) => {
                if let Some(token) = self.suggestions.get(index) {
                    let text = humanize_symptom(token);
                    view.set_input(&text);
                    self.clear_suggestions(view);
                }
                Vec::new()
            }
            ChatEvent::ClearHistory => {
                self.clear_history(view);
                Vec::new()
            }
            ChatEvent::ResetForm => {
                self.session = DiagnosisSession {
                    flow: self.session.flow.wrapping_add(1),
                    ..DiagnosisSession::default()
                };
                view.close_followup_form();
                view.set_input("");
                self.clear_suggestions(view);
                Vec::new()
            }
            ChatEvent::ShowTab(tab) => self.show_tab(tab, view),
            ChatEvent::ReadAloud(text) => {
                if self.capabilities.speech_output {
                    view.speak(&text);
                }
                Vec::new()
            }
            ChatEvent::ToggleVoiceOutput => {
                self.preferences.voice_enabled = !self.preferences.voice_enabled;
                if let Err(e) = self.preferences.save_voice(&mut self.store) {
                    warn!("Failed to persist voice preference: {}", e);
                }
                view.render_preferences(&self.preferences);
                Vec::new()
            }
            ChatEvent::ToggleTheme => {
                self.preferences.theme = self.preferences.theme.toggled();
                if let Err(e) = self.preferences.save_theme(&mut self.store) {
                    warn!("Failed to persist theme: {}", e);
                }
                view.render_preferences(&self.preferences);
                Vec::new()
            }
            ChatEvent::Voice(event) => self.voice_event(event, view),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn session(&self) -> &DiagnosisSession {
        &self.session
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn voice_state(&self) -> VoiceState {
        self.voice.state()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn voice_status(&self) -> VoiceStatus {
        if self.voice.is_supported() {
            VoiceStatus::Active(self.voice.state())
        } else {
            VoiceStatus::Unsupported
        }
    }

    fn append(&mut self, message: Message, view: &mut dyn Presenter) {
        view.render_message(&message);
        if let Err(e) = self.transcript.append(message, &mut self.store) {
            warn!("Failed to persist chat history: {}", e);
        }
    }

    /// Append a bot message and read it aloud when voice output is on
    fn say(&mut self, text: &str, view: &mut dyn Presenter) {
        self.append(Message::bot(text), view);
        if self.preferences.voice_enabled && self.capabilities.speech_output {
            view.speak(text);
        }
    }

    fn clear_suggestions(&mut self, view: &mut dyn Presenter) {
        self.suggestions.clear();
        view.render_suggestions(&[]);
    }

    fn submit(&mut self, text: &str, view: &mut dyn Presenter) -> Vec<Effect> {
        let Some(intent) = router::classify(text) else {
            return Vec::new();
        };
        let text = text.trim().to_string();

        self.append(Message::user(text.clone()), view);
        view.set_input("");
        self.clear_suggestions(view);

        match intent {
            Intent::Question => {
                debug!("Routing to health Q&A");
                vec![Effect::Request(ApiRequest::HealthQa(HealthQaRequest {
                    question: text,
                }))]
            }
            Intent::SymptomStatement => {
                debug!("Routing to diagnosis");
                self.request_diagnosis(DiagnoseRequest::free_text(text.clone()), text)
            }
        }
    }

    fn submit_form(&mut self, form: DiagnosisForm, view: &mut dyn Presenter) -> Vec<Effect> {
        let symptom = form.symptom.trim();
        let known_disease = form.known_disease.trim();
        if symptom.is_empty() && known_disease.is_empty() {
            view.render_validation(EMPTY_FORM_MESSAGE);
            return Vec::new();
        }

        let request = DiagnoseRequest {
            symptom: (!symptom.is_empty()).then(|| symptom.to_string()),
            known_disease: (!known_disease.is_empty()).then(|| known_disease.to_string()),
            days: Some(form.days.unwrap_or(DEFAULT_DURATION_DAYS)),
            age: form.age,
            symptoms: None,
        };
        let label = if known_disease.is_empty() {
            symptom.to_string()
        } else {
            known_disease.to_string()
        };

        self.session.age = form.age;
        self.append(Message::user(label.clone()), view);
        self.clear_suggestions(view);
        self.request_diagnosis(request, label)
    }

    fn request_diagnosis(&mut self, request: DiagnoseRequest, input: String) -> Vec<Effect> {
        self.session.last_symptom_input = Some(input);
        self.session.last_request = Some(request.clone());
        vec![Effect::Request(ApiRequest::Diagnose(self.session.flow, request))]
    }

    fn diagnosis_completed(
        &mut self,
        result: Result<DiagnoseResponse, ApiError>,
        view: &mut dyn Presenter,
    ) {
        let resp = match result {
            Ok(resp) => resp,
            Err(ApiError::Rejected(message)) => {
                self.say(&message, view);
                return;
            }
            Err(e) => {
                warn!("Diagnosis request failed: {}", e);
                self.say(DIAGNOSIS_APOLOGY, view);
                return;
            }
        };

        match DiagnosisOutcome::of(&resp) {
            DiagnosisOutcome::Rejected(message) => self.say(&message, view),
            DiagnosisOutcome::FollowupRequired { disease, questions } => {
                debug!(
                    "Diagnosis needs {} follow-up answers (hypothesis: {:?})",
                    questions.len(),
                    disease
                );
                let pending = PendingFollowup::new(disease, questions);
                view.render_followup_form(&pending.form());
                self.session.pending_followup = Some(pending);
            }
            DiagnosisOutcome::Resolved(disease) => {
                let input = self.session.last_symptom_input.clone().unwrap_or_default();
                let report = DiagnosisReport::from_diagnosis(&resp, &disease, &input);
                self.finish(report, view);
            }
            DiagnosisOutcome::Unrecognized => {
                view.render_clarification(CLARIFICATION_PROMPT);
                self.say(CLARIFICATION_PROMPT, view);
            }
        }
    }

    /// Render a final result and close any open follow-up flow
    fn finish(&mut self, report: DiagnosisReport, view: &mut dyn Presenter) {
        if self.session.pending_followup.take().is_some() {
            view.close_followup_form();
        }
        view.render_result(&report);
        self.say(&report.result_message, view);
    }

    fn submit_followup(&mut self, view: &mut dyn Presenter) -> Vec<Effect> {
        let Some(pending) = &self.session.pending_followup else {
            debug!("Follow-up submitted with no open questionnaire");
            return Vec::new();
        };

        if pending.answers.iter().any(|a| a.trim().is_empty()) {
            view.render_validation(INCOMPLETE_FOLLOWUP_MESSAGE);
            return Vec::new();
        }

        let answers: BTreeMap<String, String> = pending
            .questions
            .iter()
            .cloned()
            .zip(pending.answers.iter().cloned())
            .collect();

        vec![Effect::Request(ApiRequest::Followup(
            self.session.flow,
            FollowupRequest {
                answers,
                disease: pending.disease.clone(),
                age: self.session.age,
            },
        ))]
    }

    fn followup_completed(
        &mut self,
        result: Result<FollowupResponse, ApiError>,
        view: &mut dyn Presenter,
    ) {
        let Some(pending) = &self.session.pending_followup else {
            debug!("Discarding follow-up completion for a closed questionnaire");
            return;
        };

        match result {
            Ok(resp) => {
                if let Some(error) = resp.error.as_deref().filter(|e| !e.trim().is_empty()) {
                    view.render_error(&ErrorBanner::new(error));
                    return;
                }
                let report = DiagnosisReport::from_followup(&resp, pending.disease.as_deref());
                self.finish(report, view);
            }
            Err(ApiError::Rejected(message)) => view.render_error(&ErrorBanner::new(message)),
            Err(e) => {
                warn!("Follow-up submission failed: {}", e);
                view.render_error(&ErrorBanner::new(FOLLOWUP_ERROR));
            }
        }
    }

    fn qa_completed(&mut self, result: Result<HealthQaResponse, ApiError>, view: &mut dyn Presenter) {
        match result {
            Ok(resp) if !resp.answer.trim().is_empty() => {
                self.say(&resp.answer, view);
                view.render_answer(&resp.answer);
            }
            Ok(_) => {
                warn!("Health Q&A returned an empty answer");
                self.say(QA_APOLOGY, view);
            }
            Err(e) => {
                warn!("Health Q&A request failed: {}", e);
                self.say(QA_APOLOGY, view);
            }
        }
    }

    fn clear_history(&mut self, view: &mut dyn Presenter) {
        if !view.confirm(CLEAR_HISTORY_PROMPT) {
            return;
        }
        if let Err(e) = self.transcript.clear(&mut self.store) {
            warn!("Failed to clear persisted chat history: {}", e);
        }
        view.render_welcome();
    }

    fn show_tab(&mut self, tab: Tab, view: &mut dyn Presenter) -> Vec<Effect> {
        match tab {
            Tab::Diagnosis => match self.session.last_request.clone() {
                Some(request) => {
                    vec![Effect::Request(ApiRequest::Diagnose(self.session.flow, request))]
                }
                None => Vec::new(),
            },
            Tab::HealthTips => {
                view.render_panel(&Panel::HealthTips(&HEALTH_TIPS));
                Vec::new()
            }
            Tab::History => {
                let entries = history_entries(self.transcript.recent(TRANSCRIPT_CAPACITY));
                view.render_panel(&Panel::History(entries));
                Vec::new()
            }
        }
    }

    fn voice_event(&mut self, event: VoiceEvent, view: &mut dyn Presenter) -> Vec<Effect> {
        let mut effects = Vec::new();

        for action in self.voice.handle(event) {
            match action {
                VoiceAction::Start => effects.push(Effect::StartListening),
                VoiceAction::Stop => effects.push(Effect::StopListening),
                VoiceAction::RestartAfter(after) => {
                    effects.push(Effect::RestartListening { after })
                }
                VoiceAction::ShowInterim(text) => {
                    view.render_recognized(&RecognizedSpeech::Interim(text))
                }
                VoiceAction::ShowFinal(text) => {
                    view.render_recognized(&RecognizedSpeech::Final(text))
                }
                VoiceAction::ShowError(message) => {
                    view.render_recognized(&RecognizedSpeech::Error(message))
                }
                VoiceAction::Submit(text) => {
                    view.set_input(&text);
                    effects.extend(self.submit(&text, view));
                }
                VoiceAction::GaveUp => view.render_error(&ErrorBanner::new(VOICE_GAVE_UP_MESSAGE)),
            }
        }

        view.render_voice_status(self.voice_status());
        effects
    }
}
