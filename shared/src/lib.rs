use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Constants shared by the frontend, the CLI and the session library
pub mod protocol;

// API client types and trait
pub mod api;
pub use api::{ApiClientConfig, ApiError, HealthChatApi};

/// Request body for `POST /api/diagnose`.
///
/// The chat box sends free text as `symptoms`; the structured form sends
/// `symptom` together with the duration, age and known-disease override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_disease: Option<String>,
}

impl DiagnoseRequest {
    /// Free-text symptom statement typed into the chat box
    pub fn free_text(symptoms: impl Into<String>) -> Self {
        Self {
            symptoms: Some(symptoms.into()),
            ..Self::default()
        }
    }
}

/// Response from `POST /api/diagnose`.
///
/// Every field is optional on the wire; the backend returns either a final
/// diagnosis, a follow-up question list, or an `error` string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseResponse {
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Confidence in [0, 1]; the backend does not guarantee the upper bound
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub precautions: Vec<String>,
    #[serde(default)]
    pub all_possible_diseases: Vec<String>,
    #[serde(default)]
    pub symptoms_present: Vec<String>,
    #[serde(default)]
    pub result_message: Option<String>,
    /// Severity advice ("You should take the consultation from doctor.")
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub followup: Vec<String>,
}

/// Request body for `POST /api/diagnose_followup`.
///
/// `disease` and `age` are always serialized, as `null` when unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowupRequest {
    /// Answers keyed by the exact question text
    pub answers: BTreeMap<String, String>,
    pub disease: Option<String>,
    pub age: Option<u32>,
}

/// Response from `POST /api/diagnose_followup`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowupResponse {
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub precautions: Vec<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub result_message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body for `POST /api/health_qa`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthQaRequest {
    pub question: String,
}

/// Response from `POST /api/health_qa`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthQaResponse {
    pub answer: String,
}

/// Request body for `POST /api/suggest_symptoms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub text: String,
}

/// Response from `POST /api/suggest_symptoms`.
/// Suggestions are backend symptom tokens such as `skin_rash`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Response from `GET /api/get_symptoms`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomListResponse {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Render a backend symptom token for humans (`skin_rash` -> `skin rash`)
pub fn humanize_symptom(token: &str) -> String {
    token.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_diagnose_only_sends_symptoms() {
        let req = DiagnoseRequest::free_text("I have fever and cough");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"symptoms": "I have fever and cough"}));
    }

    #[test]
    fn test_structured_diagnose_sends_form_fields() {
        let req = DiagnoseRequest {
            symptom: Some("headache".into()),
            days: Some(3),
            age: Some(40),
            known_disease: None,
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"symptom": "headache", "days": 3, "age": 40})
        );
    }

    #[test]
    fn test_diagnose_response_tolerates_missing_fields() {
        let resp: DiagnoseResponse =
            serde_json::from_str(r#"{"followup": ["Q1"], "disease": "Dengue"}"#).unwrap();
        assert_eq!(resp.disease.as_deref(), Some("Dengue"));
        assert_eq!(resp.followup, vec!["Q1".to_string()]);
        assert!(resp.precautions.is_empty());
        assert!(resp.confidence.is_none());
    }

    #[test]
    fn test_followup_request_serializes_null_age_and_disease() {
        let mut answers = BTreeMap::new();
        answers.insert("Q1".to_string(), "yes".to_string());
        let req = FollowupRequest {
            answers,
            disease: None,
            age: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"answers": {"Q1": "yes"}, "disease": null, "age": null})
        );
    }

    #[test]
    fn test_symptom_list_defaults_to_empty() {
        let resp: SymptomListResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.symptoms.is_empty());

        let resp: SymptomListResponse =
            serde_json::from_str(r#"{"symptoms": ["itching", "skin_rash"]}"#).unwrap();
        assert_eq!(resp.symptoms.len(), 2);
    }

    #[test]
    fn test_humanize_replaces_underscores() {
        assert_eq!(humanize_symptom("skin_rash"), "skin rash");
        assert_eq!(humanize_symptom("cough"), "cough");
    }
}
