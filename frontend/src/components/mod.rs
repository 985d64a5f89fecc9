pub mod chat_widget;
pub mod copy_button;
pub mod diagnosis_form;
pub mod followup_form;
pub mod highlighted;
pub mod message_list;
pub mod result_panel;
pub mod side_panel;
pub mod suggestion_list;
pub mod voice_button;

pub use chat_widget::ChatWidget;
pub use copy_button::CopyButton;
pub use diagnosis_form::DiagnosisFormView;
pub use followup_form::FollowupFormView;
pub use highlighted::Highlighted;
pub use message_list::MessageList;
pub use result_panel::ResultPanel;
pub use side_panel::SidePanel;
pub use suggestion_list::SuggestionList;
pub use voice_button::VoiceButton;
