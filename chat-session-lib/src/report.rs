//! View models for diagnosis results, the history panel and health tips

use shared::{humanize_symptom, DiagnoseResponse, FollowupResponse};

use crate::message::{Message, Sender};

/// Shown when the backend returns no precautions
pub const FALLBACK_PRECAUTION: &str = "Consult a healthcare professional";

pub const NO_DESCRIPTION: &str = "No description available";

/// Characters of each message shown in the history panel
pub const HISTORY_PREVIEW_CHARS: usize = 150;

/// Convert a 0-1 confidence into a whole percentage clamped to [0, 100]
pub fn confidence_percent(confidence: f64) -> u8 {
    if !confidence.is_finite() {
        return 0;
    }
    (confidence * 100.0).clamp(0.0, 100.0).round() as u8
}

fn precautions_or_fallback(precautions: &[String]) -> Vec<String> {
    let listed: Vec<String> = precautions
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if listed.is_empty() {
        vec![FALLBACK_PRECAUTION.to_string()]
    } else {
        listed
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Everything the result panel shows for a resolved diagnosis
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisReport {
    pub disease: String,
    pub description: String,
    /// Comma-separated symptoms the backend matched, or the user's own words
    pub detected_symptoms: Option<String>,
    pub other_diseases: Vec<String>,
    /// `None` when the backend sent no confidence (follow-up results)
    pub confidence_percent: Option<u8>,
    pub condition: Option<String>,
    /// Never empty
    pub precautions: Vec<String>,
    pub result_message: String,
}

impl DiagnosisReport {
    /// Build the report for a resolved `/api/diagnose` response
    pub fn from_diagnosis(resp: &DiagnoseResponse, disease: &str, input: &str) -> Self {
        let matched: Vec<String> = resp
            .symptoms_present
            .iter()
            .map(|s| humanize_symptom(s))
            .collect();
        let detected_symptoms = if matched.is_empty() {
            non_empty(Some(input))
        } else {
            Some(matched.join(", "))
        };

        let other_diseases = if resp.all_possible_diseases.len() > 1 {
            resp.all_possible_diseases
                .iter()
                .filter(|d| d.as_str() != disease)
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        Self {
            disease: disease.to_string(),
            description: non_empty(resp.description.as_deref())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            detected_symptoms,
            other_diseases,
            confidence_percent: resp.confidence.map(confidence_percent),
            condition: non_empty(resp.condition.as_deref()),
            precautions: precautions_or_fallback(&resp.precautions),
            result_message: non_empty(resp.result_message.as_deref())
                .unwrap_or_else(|| format!("I detected: {}", disease)),
        }
    }

    /// Build the report for a `/api/diagnose_followup` response.
    ///
    /// `hypothesis` is the disease that was sent with the answers.
    pub fn from_followup(resp: &FollowupResponse, hypothesis: Option<&str>) -> Self {
        let disease = non_empty(resp.disease.as_deref())
            .or_else(|| non_empty(hypothesis))
            .unwrap_or_else(|| shared::protocol::UNKNOWN_DISEASE.to_string());

        Self {
            description: non_empty(resp.description.as_deref())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            detected_symptoms: None,
            other_diseases: Vec::new(),
            confidence_percent: None,
            condition: non_empty(resp.condition.as_deref()),
            precautions: precautions_or_fallback(&resp.precautions),
            result_message: non_empty(resp.result_message.as_deref())
                .unwrap_or_else(|| format!("I detected: {}", disease)),
            disease,
        }
    }

    /// "42%", or "N/A" without a confidence
    pub fn confidence_label(&self) -> String {
        match self.confidence_percent {
            Some(p) => format!("{}%", p),
            None => "N/A".to_string(),
        }
    }
}

/// One row of the history panel
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub sender: Sender,
    pub timestamp: String,
    pub preview: String,
}

/// Most recent messages first, each text cut to [`HISTORY_PREVIEW_CHARS`]
pub fn history_entries(messages: &[Message]) -> Vec<HistoryEntry> {
    messages
        .iter()
        .rev()
        .map(|m| HistoryEntry {
            sender: m.sender(),
            timestamp: m.timestamp().to_string(),
            preview: m.text().chars().take(HISTORY_PREVIEW_CHARS).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthTip {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

pub const HEALTH_TIPS: [HealthTip; 6] = [
    HealthTip {
        icon: "\u{1F3C3}",
        title: "Exercise",
        text: "Get at least 30 minutes of moderate exercise daily",
    },
    HealthTip {
        icon: "\u{1F6CF}\u{FE0F}",
        title: "Sleep",
        text: "Aim for 7-9 hours of quality sleep each night",
    },
    HealthTip {
        icon: "\u{1F957}",
        title: "Nutrition",
        text: "Eat a balanced diet with fruits, vegetables, and whole grains",
    },
    HealthTip {
        icon: "\u{1F4A7}",
        title: "Hydration",
        text: "Drink at least 8 glasses of water daily",
    },
    HealthTip {
        icon: "\u{1F9D8}",
        title: "Stress Management",
        text: "Practice meditation, yoga, or deep breathing exercises",
    },
    HealthTip {
        icon: "\u{1F3E5}",
        title: "Regular Check-ups",
        text: "Visit your doctor for regular health screenings",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(confidence: Option<f64>, precautions: Vec<&str>) -> DiagnoseResponse {
        DiagnoseResponse {
            disease: Some("Flu".into()),
            description: Some("A viral infection".into()),
            confidence,
            precautions: precautions.into_iter().map(String::from).collect(),
            all_possible_diseases: vec!["Flu".into(), "Common Cold".into()],
            symptoms_present: vec!["high_fever".into(), "cough".into()],
            result_message: Some("You may have Flu".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(confidence_percent(1.37), 100);
        assert_eq!(confidence_percent(0.42), 42);
        assert_eq!(confidence_percent(-0.5), 0);
        assert_eq!(confidence_percent(f64::NAN), 0);
    }

    #[test]
    fn test_empty_precautions_use_single_fallback() {
        let report = DiagnosisReport::from_diagnosis(&resolved(Some(0.5), vec![]), "Flu", "fever");
        assert_eq!(report.precautions, vec![FALLBACK_PRECAUTION.to_string()]);

        let report =
            DiagnosisReport::from_diagnosis(&resolved(Some(0.5), vec!["", "  "]), "Flu", "fever");
        assert_eq!(report.precautions.len(), 1);
    }

    #[test]
    fn test_report_fields() {
        let report = DiagnosisReport::from_diagnosis(
            &resolved(Some(1.37), vec!["rest", "drink fluids"]),
            "Flu",
            "fever",
        );
        assert_eq!(report.confidence_label(), "100%");
        assert_eq!(report.detected_symptoms.as_deref(), Some("high fever, cough"));
        assert_eq!(report.other_diseases, vec!["Common Cold".to_string()]);
        assert_eq!(report.result_message, "You may have Flu");
        assert_eq!(report.precautions.len(), 2);
    }

    #[test]
    fn test_report_falls_back_to_input_and_default_message() {
        let resp = DiagnoseResponse {
            disease: Some("Malaria".into()),
            ..Default::default()
        };
        let report = DiagnosisReport::from_diagnosis(&resp, "Malaria", "chills at night");
        assert_eq!(report.detected_symptoms.as_deref(), Some("chills at night"));
        assert_eq!(report.description, NO_DESCRIPTION);
        assert_eq!(report.result_message, "I detected: Malaria");
        assert_eq!(report.confidence_label(), "N/A");
        assert!(report.other_diseases.is_empty());
    }

    #[test]
    fn test_followup_report_uses_hypothesis() {
        let resp = FollowupResponse {
            result_message: Some("Based on your answers, monitor symptoms".into()),
            ..Default::default()
        };
        let report = DiagnosisReport::from_followup(&resp, Some("Dengue"));
        assert_eq!(report.disease, "Dengue");
        assert_eq!(report.precautions, vec![FALLBACK_PRECAUTION.to_string()]);
        assert!(report.confidence_percent.is_none());
    }

    #[test]
    fn test_history_entries_newest_first_and_truncated() {
        let long = "x".repeat(400);
        let messages = vec![
            Message::with_timestamp(Sender::User, "old", "1:00:00 PM"),
            Message::with_timestamp(Sender::Bot, long, "1:00:01 PM"),
        ];
        let entries = history_entries(&messages);
        assert_eq!(entries[0].sender, Sender::Bot);
        assert_eq!(entries[0].preview.chars().count(), HISTORY_PREVIEW_CHARS);
        assert_eq!(entries[1].preview, "old");
    }
}
