//! Chat transcript messages

use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
    /// Local wall-clock time for display ("3:04:05 PM")
    timestamp: String,
}

impl Message {
    /// Create a message stamped with the current local time
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self::with_timestamp(sender, text, display_time(chrono::Local::now()))
    }

    pub fn with_timestamp(
        sender: Sender,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

fn display_time<Tz: chrono::TimeZone>(now: chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sender_serializes_lowercase() {
        let msg = Message::with_timestamp(Sender::Bot, "hello", "9:00:00 AM");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sender": "bot", "text": "hello", "timestamp": "9:00:00 AM"})
        );
    }

    #[test]
    fn test_display_time_format() {
        let t = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 15, 4, 5).unwrap();
        assert_eq!(display_time(t), "3:04:05 PM");
    }

    #[test]
    fn test_constructors_set_sender() {
        assert_eq!(Message::user("a").sender(), Sender::User);
        assert_eq!(Message::bot("b").sender(), Sender::Bot);
        assert!(!Message::bot("b").timestamp().is_empty());
    }
}
