//! MediChat Session Library
//!
//! The client-side interaction logic of the MediChat symptom checker,
//! independent of any UI toolkit or HTTP client. The browser widget and the
//! terminal client both drive the same controller.
//!
//! # Overview
//!
//! The library provides:
//! - `ChatController` - Turns UI events and backend completions into render
//!   commands and effects
//! - `Presenter` - The render interface a UI implements
//! - `perform` - Runs a backend request through any `HealthChatApi` client
//! - `Transcript` / `Preferences` - State persisted through a `KeyValueStore`
//! - `VoiceInput` - The continuous speech-recognition state machine
//!
//! # Example
//!
//! ```ignore
//! use chat_session_lib::{perform, Capabilities, ChatController, ChatEvent, Effect, MemoryStore};
//!
//! let mut controller = ChatController::new(MemoryStore::new(), Capabilities::default());
//! controller.start(&mut view);
//!
//! let mut effects = controller.handle(ChatEvent::Submit("I have fever".into()), &mut view);
//! while let Some(effect) = effects.pop() {
//!     if let Effect::Request(request) = effect {
//!         let completion = perform(&client, request).await;
//!         effects.extend(controller.handle(completion, &mut view));
//!     }
//! }
//! ```

pub mod driver;
pub mod error;
pub mod highlight;
pub mod message;
pub mod preferences;
pub mod presenter;
pub mod report;
pub mod router;
pub mod session;
pub mod storage;
pub mod transcript;
pub mod voice;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types at crate root
pub use driver::perform;
pub use error::StorageError;
pub use highlight::{highlight_terms, Segment};
pub use message::{Message, Sender};
pub use preferences::{Preferences, Theme};
pub use presenter::{
    ErrorBanner, FollowupForm, Panel, Presenter, RecognizedSpeech, VoiceStatus,
};
pub use report::{DiagnosisReport, HealthTip, HistoryEntry, HEALTH_TIPS};
pub use session::{
    ApiRequest, Capabilities, ChatController, ChatEvent, DiagnosisForm, DiagnosisOutcome, Effect,
    FlowId, Tab,
};
pub use storage::{KeyValueStore, MemoryStore};
pub use transcript::{Transcript, TRANSCRIPT_CAPACITY};
pub use voice::{VoiceEvent, VoiceInput, VoiceState};
