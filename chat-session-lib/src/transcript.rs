//! Capped, persisted chat transcript

use shared::protocol::CHAT_HISTORY_KEY;
use tracing::warn;

use crate::error::StorageError;
use crate::message::Message;
use crate::storage::KeyValueStore;

/// Number of messages kept in persisted storage
pub const TRANSCRIPT_CAPACITY: usize = 10;

/// Ordered log of exchanged messages.
///
/// The in-memory log keeps everything said during this session; the
/// persisted copy is always the most recent [`TRANSCRIPT_CAPACITY`] entries.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted transcript. Absent or malformed data yields an empty log.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.get(CHAT_HISTORY_KEY) else {
            return Self::default();
        };

        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(mut messages) => {
                if messages.len() > TRANSCRIPT_CAPACITY {
                    messages.drain(..messages.len() - TRANSCRIPT_CAPACITY);
                }
                Self { messages }
            }
            Err(e) => {
                warn!("Ignoring unreadable chat history: {}", e);
                Self::default()
            }
        }
    }

    /// Append a message and persist the capped tail.
    ///
    /// The message is kept in memory even when persisting fails.
    pub fn append<S: KeyValueStore + ?Sized>(
        &mut self,
        message: Message,
        store: &mut S,
    ) -> Result<(), StorageError> {
        self.messages.push(message);
        let json = serde_json::to_string(self.persisted())?;
        store.set(CHAT_HISTORY_KEY, &json)
    }

    /// Wipe both the in-memory and the persisted log
    pub fn clear<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<(), StorageError> {
        self.messages.clear();
        store.remove(CHAT_HISTORY_KEY)
    }

    /// All messages seen this session, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The view that is written to storage, oldest first
    pub fn persisted(&self) -> &[Message] {
        self.recent(TRANSCRIPT_CAPACITY)
    }

    /// The last `n` messages, oldest first
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;
    use crate::storage::MemoryStore;

    fn persisted_texts(store: &MemoryStore) -> Vec<String> {
        let raw = store.get(CHAT_HISTORY_KEY).unwrap();
        let messages: Vec<Message> = serde_json::from_str(&raw).unwrap();
        messages.iter().map(|m| m.text().to_string()).collect()
    }

    #[test]
    fn test_persisted_length_is_capped() {
        for total in [1usize, 9, 10, 11, 25] {
            let mut store = MemoryStore::new();
            let mut transcript = Transcript::new();
            for i in 0..total {
                transcript
                    .append(Message::user(format!("m{}", i)), &mut store)
                    .unwrap();
            }

            let texts = persisted_texts(&store);
            assert_eq!(texts.len(), total.min(TRANSCRIPT_CAPACITY));

            let expected: Vec<String> = (total.saturating_sub(TRANSCRIPT_CAPACITY)..total)
                .map(|i| format!("m{}", i))
                .collect();
            assert_eq!(texts, expected);
            assert_eq!(transcript.len(), total);
        }
    }

    #[test]
    fn test_load_replays_in_order() {
        let mut store = MemoryStore::new();
        let mut transcript = Transcript::new();
        transcript.append(Message::user("first"), &mut store).unwrap();
        transcript.append(Message::bot("second"), &mut store).unwrap();

        let loaded = Transcript::load(&store);
        let texts: Vec<&str> = loaded.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(loaded.messages()[1].sender(), Sender::Bot);
    }

    #[test]
    fn test_load_tolerates_missing_and_malformed() {
        let store = MemoryStore::new();
        assert!(Transcript::load(&store).is_empty());

        let mut store = MemoryStore::new();
        store.set(CHAT_HISTORY_KEY, "{not json").unwrap();
        assert!(Transcript::load(&store).is_empty());
    }

    #[test]
    fn test_load_trims_oversized_history() {
        let messages: Vec<Message> = (0..15)
            .map(|i| Message::with_timestamp(Sender::User, format!("m{}", i), "1:00:00 PM"))
            .collect();
        let mut store = MemoryStore::new();
        store
            .set(CHAT_HISTORY_KEY, &serde_json::to_string(&messages).unwrap())
            .unwrap();

        let loaded = Transcript::load(&store);
        assert_eq!(loaded.len(), TRANSCRIPT_CAPACITY);
        assert_eq!(loaded.messages()[0].text(), "m5");
    }

    #[test]
    fn test_clear_wipes_storage() {
        let mut store = MemoryStore::new();
        let mut transcript = Transcript::new();
        transcript.append(Message::user("hi"), &mut store).unwrap();

        transcript.clear(&mut store).unwrap();
        assert!(transcript.is_empty());
        assert!(store.get(CHAT_HISTORY_KEY).is_none());
    }
}
