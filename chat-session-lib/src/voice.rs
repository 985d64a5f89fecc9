//! Continuous voice-input state machine.
//!
//! The speech engine ends its session on its own (silence, network hiccups).
//! While the user still wants to listen, each natural end schedules one
//! restart after [`RESTART_DELAY`]. Repeated errors end continuous listening.

use std::time::Duration;

use tracing::{debug, warn};

/// Pause between a natural end and the automatic restart
pub const RESTART_DELAY: Duration = Duration::from_millis(250);

/// Consecutive errors (with no recognized speech in between) before giving up
pub const MAX_CONSECUTIVE_ERRORS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
    Stopping,
}

/// Signals from the user (mic button) and from the speech engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// Mic button pressed
    Toggle,
    /// Engine reported start
    Started,
    Interim(String),
    Final(String),
    Error(String),
    /// The engine refused to start; no end event will follow
    StartFailed(String),
    /// Engine session ended
    Ended,
    /// The restart delay elapsed
    RestartDue,
}

/// What the controller should do in response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceAction {
    Start,
    Stop,
    RestartAfter(Duration),
    ShowInterim(String),
    ShowFinal(String),
    ShowError(String),
    /// Recognized speech to place in the input and send
    Submit(String),
    /// Continuous listening ended after repeated errors
    GaveUp,
}

#[derive(Debug, Clone, Default)]
pub struct VoiceInput {
    supported: bool,
    state: VoiceState,
    /// The user wants listening to continue across engine sessions
    desired: bool,
    restart_pending: bool,
    consecutive_errors: u32,
}

impl VoiceInput {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            ..Self::default()
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn wants_listening(&self) -> bool {
        self.desired
    }

    pub fn handle(&mut self, event: VoiceEvent) -> Vec<VoiceAction> {
        if !self.supported {
            debug!("Ignoring voice event without speech support: {:?}", event);
            return Vec::new();
        }

        match event {
            VoiceEvent::Toggle => self.toggle(),
            VoiceEvent::Started => {
                if self.state == VoiceState::Idle {
                    // Engine came up after we already gave up on it
                    return vec![VoiceAction::Stop];
                }
                Vec::new()
            }
            VoiceEvent::Interim(text) => {
                if self.state == VoiceState::Idle {
                    return Vec::new();
                }
                vec![VoiceAction::ShowInterim(text)]
            }
            VoiceEvent::Final(text) => {
                if self.state == VoiceState::Idle {
                    return Vec::new();
                }
                self.consecutive_errors = 0;
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Vec::new();
                }
                vec![VoiceAction::ShowFinal(text.clone()), VoiceAction::Submit(text)]
            }
            VoiceEvent::Error(message) => {
                self.consecutive_errors += 1;
                let mut actions = vec![VoiceAction::ShowError(message)];
                if self.desired && self.consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    warn!(
                        "Voice input stopped after {} consecutive errors",
                        self.consecutive_errors
                    );
                    self.desired = false;
                    if self.restart_pending {
                        self.restart_pending = false;
                        self.state = VoiceState::Idle;
                    } else if self.state == VoiceState::Listening {
                        self.state = VoiceState::Stopping;
                    }
                    actions.push(VoiceAction::GaveUp);
                }
                actions
            }
            VoiceEvent::StartFailed(message) => {
                warn!("Speech recognition failed to start: {}", message);
                self.desired = false;
                self.restart_pending = false;
                self.state = VoiceState::Idle;
                vec![VoiceAction::ShowError(message)]
            }
            VoiceEvent::Ended => match self.state {
                VoiceState::Listening if self.desired => {
                    self.restart_pending = true;
                    vec![VoiceAction::RestartAfter(RESTART_DELAY)]
                }
                VoiceState::Listening | VoiceState::Stopping => {
                    self.state = VoiceState::Idle;
                    Vec::new()
                }
                VoiceState::Idle => Vec::new(),
            },
            VoiceEvent::RestartDue => {
                if !self.restart_pending {
                    return Vec::new();
                }
                self.restart_pending = false;
                if self.desired && self.state == VoiceState::Listening {
                    vec![VoiceAction::Start]
                } else {
                    self.state = VoiceState::Idle;
                    Vec::new()
                }
            }
        }
    }

    fn toggle(&mut self) -> Vec<VoiceAction> {
        match self.state {
            VoiceState::Idle => {
                self.state = VoiceState::Listening;
                self.desired = true;
                self.consecutive_errors = 0;
                vec![VoiceAction::Start]
            }
            VoiceState::Listening if self.restart_pending => {
                // Engine already ended; cancel the scheduled restart
                self.restart_pending = false;
                self.desired = false;
                self.state = VoiceState::Idle;
                Vec::new()
            }
            VoiceState::Listening => {
                self.desired = false;
                self.state = VoiceState::Stopping;
                vec![VoiceAction::Stop]
            }
            VoiceState::Stopping => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_starts_and_stops() {
        let mut voice = VoiceInput::new(true);
        assert_eq!(voice.handle(VoiceEvent::Toggle), vec![VoiceAction::Start]);
        assert_eq!(voice.state(), VoiceState::Listening);

        assert_eq!(voice.handle(VoiceEvent::Toggle), vec![VoiceAction::Stop]);
        assert_eq!(voice.state(), VoiceState::Stopping);

        assert!(voice.handle(VoiceEvent::Ended).is_empty());
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[test]
    fn test_natural_end_restarts_after_delay() {
        let mut voice = VoiceInput::new(true);
        voice.handle(VoiceEvent::Toggle);
        voice.handle(VoiceEvent::Started);

        assert_eq!(
            voice.handle(VoiceEvent::Ended),
            vec![VoiceAction::RestartAfter(RESTART_DELAY)]
        );
        assert_eq!(voice.handle(VoiceEvent::RestartDue), vec![VoiceAction::Start]);
        // A second RestartDue without an end is ignored
        assert!(voice.handle(VoiceEvent::RestartDue).is_empty());
    }

    #[test]
    fn test_toggle_during_restart_delay_goes_idle() {
        let mut voice = VoiceInput::new(true);
        voice.handle(VoiceEvent::Toggle);
        voice.handle(VoiceEvent::Ended);

        assert!(voice.handle(VoiceEvent::Toggle).is_empty());
        assert_eq!(voice.state(), VoiceState::Idle);
        assert!(voice.handle(VoiceEvent::RestartDue).is_empty());
    }

    #[test]
    fn test_final_transcript_is_submitted() {
        let mut voice = VoiceInput::new(true);
        voice.handle(VoiceEvent::Toggle);
        assert_eq!(
            voice.handle(VoiceEvent::Interim("i have".into())),
            vec![VoiceAction::ShowInterim("i have".into())]
        );
        assert_eq!(
            voice.handle(VoiceEvent::Final(" i have fever ".into())),
            vec![
                VoiceAction::ShowFinal("i have fever".into()),
                VoiceAction::Submit("i have fever".into())
            ]
        );
    }

    #[test]
    fn test_repeated_errors_end_continuous_listening() {
        let mut voice = VoiceInput::new(true);
        voice.handle(VoiceEvent::Toggle);

        for _ in 0..MAX_CONSECUTIVE_ERRORS - 1 {
            let actions = voice.handle(VoiceEvent::Error("network".into()));
            assert_eq!(actions, vec![VoiceAction::ShowError("network".into())]);
            assert!(!voice.handle(VoiceEvent::Ended).is_empty());
            assert_eq!(voice.handle(VoiceEvent::RestartDue), vec![VoiceAction::Start]);
        }

        let actions = voice.handle(VoiceEvent::Error("network".into()));
        assert!(actions.contains(&VoiceAction::GaveUp));
        assert!(!voice.wants_listening());

        assert!(voice.handle(VoiceEvent::Ended).is_empty());
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[test]
    fn test_recognized_speech_resets_error_count() {
        let mut voice = VoiceInput::new(true);
        voice.handle(VoiceEvent::Toggle);
        voice.handle(VoiceEvent::Error("no-speech".into()));
        voice.handle(VoiceEvent::Error("no-speech".into()));
        voice.handle(VoiceEvent::Final("cough".into()));

        let actions = voice.handle(VoiceEvent::Error("no-speech".into()));
        assert!(!actions.contains(&VoiceAction::GaveUp));
        assert!(voice.wants_listening());
    }

    #[test]
    fn test_failed_start_returns_to_idle() {
        let mut voice = VoiceInput::new(true);
        assert_eq!(voice.handle(VoiceEvent::Toggle), vec![VoiceAction::Start]);

        assert_eq!(
            voice.handle(VoiceEvent::StartFailed("InvalidStateError".into())),
            vec![VoiceAction::ShowError("InvalidStateError".into())]
        );
        assert_eq!(voice.state(), VoiceState::Idle);
        assert!(!voice.wants_listening());

        // The mic works again on the next press
        assert_eq!(voice.handle(VoiceEvent::Toggle), vec![VoiceAction::Start]);
        assert_eq!(voice.state(), VoiceState::Listening);
    }

    #[test]
    fn test_failed_restart_ends_continuous_listening() {
        let mut voice = VoiceInput::new(true);
        voice.handle(VoiceEvent::Toggle);
        voice.handle(VoiceEvent::Ended);
        assert_eq!(voice.handle(VoiceEvent::RestartDue), vec![VoiceAction::Start]);

        voice.handle(VoiceEvent::StartFailed("not-allowed".into()));
        assert_eq!(voice.state(), VoiceState::Idle);
        assert!(voice.handle(VoiceEvent::RestartDue).is_empty());
        assert_eq!(voice.handle(VoiceEvent::Toggle), vec![VoiceAction::Start]);
    }

    #[test]
    fn test_unsupported_ignores_everything() {
        let mut voice = VoiceInput::new(false);
        assert!(voice.handle(VoiceEvent::Toggle).is_empty());
        assert_eq!(voice.state(), VoiceState::Idle);
    }
}
