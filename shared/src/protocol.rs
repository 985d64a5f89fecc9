/// Disease name the diagnosis backend returns when it cannot match the input.
pub const UNKNOWN_DISEASE: &str = "Unknown";

/// localStorage / store key holding the JSON array of transcript messages.
pub const CHAT_HISTORY_KEY: &str = "chatHistory";

/// Store key for the voice-output preference ("true" / "false").
pub const VOICE_ENABLED_KEY: &str = "voiceEnabled";

/// Store key for the colour theme ("dark" / "light").
pub const THEME_KEY: &str = "theme";
