//! Medical-term highlighting for chat text

/// Vocabulary highlighted in messages and answers
pub const MEDICAL_TERMS: &[&str] = &[
    "fever", "cough", "headache", "body ache", "fatigue", "cold", "nausea", "diarrhea",
    "congestion", "sore throat", "rash", "swelling", "itching", "chills", "dengue",
    "malaria", "diabetes", "hypertension", "cholera", "pneumonia", "tuberculosis",
    "typhoid", "asthma", "bronchitis", "pneumonitis", "cardiac", "heart", "stroke",
    "anxiety", "depression", "vertigo", "acne", "ulcers", "hemorrhoids", "arthritis",
    "psoriasis", "impetigo", "fungal", "allergy", "jaundice", "precaution", "symptom",
    "disease", "medication", "treatment", "doctor", "hospital", "pharmacy",
];

/// A run of text, either plain or a highlighted medical term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length of the longest term matching whole-word at byte `at`
fn term_at(lower: &str, at: usize) -> Option<usize> {
    let rest = &lower[at..];
    MEDICAL_TERMS
        .iter()
        .filter(|term| rest.starts_with(*term))
        .map(|term| term.len())
        .filter(|&len| rest.as_bytes().get(len).map_or(true, |&b| !is_word_byte(b)))
        .max()
}

/// Split `text` into plain and highlighted segments.
///
/// Matching is case-insensitive and whole-word; the original casing is kept.
pub fn highlight_terms(text: &str) -> Vec<Segment<'_>> {
    // ASCII lowercasing keeps byte offsets identical to `text`
    let lower = text.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let at_word_start = is_word_byte(bytes[i]) && (i == 0 || !is_word_byte(bytes[i - 1]));
        if at_word_start {
            if let Some(len) = term_at(&lower, i) {
                if plain_start < i {
                    segments.push(Segment {
                        text: &text[plain_start..i],
                        highlighted: false,
                    });
                }
                segments.push(Segment {
                    text: &text[i..i + len],
                    highlighted: true,
                });
                i += len;
                plain_start = i;
                continue;
            }
        }
        i += 1;
    }

    if plain_start < text.len() {
        segments.push(Segment {
            text: &text[plain_start..],
            highlighted: false,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighted(text: &str) -> Vec<&str> {
        highlight_terms(text)
            .into_iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_highlights_terms_preserving_case() {
        assert_eq!(highlighted("I have Fever and a COUGH"), vec!["Fever", "COUGH"]);
    }

    #[test]
    fn test_whole_words_only() {
        assert!(highlighted("colder weather, feverish").is_empty());
        assert_eq!(highlighted("a cold."), vec!["cold"]);
    }

    #[test]
    fn test_multi_word_terms() {
        assert_eq!(highlighted("My sore throat hurts"), vec!["sore throat"]);
    }

    #[test]
    fn test_segments_reassemble_text() {
        let text = "Café visit: doctor said rest — fever gone";
        let joined: String = highlight_terms(text).iter().map(|s| s.text).collect();
        assert_eq!(joined, text);
        assert_eq!(highlighted(text), vec!["doctor", "fever"]);
    }

    #[test]
    fn test_plain_text_is_single_segment() {
        let segments = highlight_terms("nothing to see");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].highlighted);
        assert!(highlight_terms("").is_empty());
    }
}
