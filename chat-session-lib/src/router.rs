//! Classifies chat input as a health question or a symptom statement

/// Substrings that mark input as a question (matched case-insensitively)
pub const QUESTION_KEYWORDS: [&str; 5] = ["how", "what", "when", "why", "tell"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Goes to the health Q&A endpoint
    Question,
    /// Goes to the diagnosis endpoint
    SymptomStatement,
}

/// Classify raw chat input. Blank input has no intent.
///
/// This is a plain substring test, so "show me" counts as a question.
pub fn classify(text: &str) -> Option<Intent> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let lower = text.to_lowercase();
    if lower.contains('?') || QUESTION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Some(Intent::Question)
    } else {
        Some(Intent::SymptomStatement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_mark_routes_to_qa() {
        assert_eq!(classify("fever?"), Some(Intent::Question));
    }

    #[test]
    fn test_keywords_route_to_qa_case_insensitive() {
        for text in [
            "How to manage stress",
            "WHAT is dengue",
            "when should I see a doctor",
            "Why do I cough",
            "tell me about diabetes",
            "show me sleep tips",
        ] {
            assert_eq!(classify(text), Some(Intent::Question), "{}", text);
        }
    }

    #[test]
    fn test_plain_statements_route_to_diagnosis() {
        for text in ["I have fever", "headache and nausea", "skin rash"] {
            assert_eq!(classify(text), Some(Intent::SymptomStatement), "{}", text);
        }
    }

    #[test]
    fn test_blank_input_is_ignored() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   \t\n"), None);
    }
}
