//! Voice-output and theme preferences, persisted independently of the transcript

use shared::protocol::{THEME_KEY, VOICE_ENABLED_KEY};

use crate::error::StorageError;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    /// Speak bot replies aloud
    pub voice_enabled: bool,
    pub theme: Theme,
}

impl Preferences {
    /// Read both flags; absent or unrecognised values fall back to voice off, dark theme
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            voice_enabled: store.get(VOICE_ENABLED_KEY).as_deref() == Some("true"),
            theme: store
                .get(THEME_KEY)
                .and_then(|v| Theme::parse(&v))
                .unwrap_or_default(),
        }
    }

    pub fn save_voice<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        store.set(
            VOICE_ENABLED_KEY,
            if self.voice_enabled { "true" } else { "false" },
        )
    }

    pub fn save_theme<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        store.set(THEME_KEY, self.theme.as_str())
    }
}
