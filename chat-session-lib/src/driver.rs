//! Runs controller effects against a backend client.

use shared::HealthChatApi;
use tracing::debug;

use crate::session::{ApiRequest, ChatEvent};

/// Perform one collaborator call and turn its result into the completion
/// event the controller expects.
pub async fn perform<A: HealthChatApi>(api: &A, request: ApiRequest) -> ChatEvent {
    match request {
        ApiRequest::Diagnose(flow, req) => {
            debug!("POST diagnose (flow {})", flow);
            ChatEvent::DiagnosisCompleted(flow, api.diagnose(&req).await)
        }
        ApiRequest::Followup(flow, req) => {
            debug!("POST diagnose_followup ({} answers)", req.answers.len());
            ChatEvent::FollowupCompleted(flow, api.diagnose_followup(&req).await)
        }
        ApiRequest::HealthQa(req) => {
            debug!("POST health_qa");
            ChatEvent::QaCompleted(api.health_qa(&req).await)
        }
        ApiRequest::Suggest(req) => ChatEvent::SuggestionsReceived(
            api.suggest_symptoms(&req)
                .await
                .map(|resp| resp.suggestions),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        ApiError, DiagnoseRequest, DiagnoseResponse, FollowupRequest, FollowupResponse,
        HealthQaRequest, HealthQaResponse, SuggestRequest, SuggestResponse, SymptomListResponse,
    };

    /// Backend with fixed answers
    struct CannedApi {
        offline: bool,
    }

    impl HealthChatApi for CannedApi {
        async fn diagnose(&self, req: &DiagnoseRequest) -> Result<DiagnoseResponse, ApiError> {
            if self.offline {
                return Err(ApiError::Network("connection refused".into()));
            }
            Ok(DiagnoseResponse {
                disease: Some("Flu".into()),
                symptoms_present: req.symptoms.iter().cloned().collect(),
                ..Default::default()
            })
        }

        async fn diagnose_followup(
            &self,
            req: &FollowupRequest,
        ) -> Result<FollowupResponse, ApiError> {
            Ok(FollowupResponse {
                disease: req.disease.clone(),
                ..Default::default()
            })
        }

        async fn health_qa(&self, req: &HealthQaRequest) -> Result<HealthQaResponse, ApiError> {
            Ok(HealthQaResponse {
                answer: format!("About {}", req.question),
            })
        }

        async fn suggest_symptoms(
            &self,
            _req: &SuggestRequest,
        ) -> Result<SuggestResponse, ApiError> {
            if self.offline {
                return Err(ApiError::Server {
                    status: 503,
                    message: "down".into(),
                });
            }
            Ok(SuggestResponse {
                suggestions: vec!["skin_rash".into()],
            })
        }

        async fn list_symptoms(&self) -> Result<SymptomListResponse, ApiError> {
            Ok(SymptomListResponse::default())
        }
    }

    #[tokio::test]
    async fn test_perform_maps_each_request() {
        let api = CannedApi { offline: false };

        let event = perform(
            &api,
            ApiRequest::Diagnose(3, DiagnoseRequest::free_text("fever")),
        )
        .await;
        assert!(matches!(
            event,
            ChatEvent::DiagnosisCompleted(3, Ok(DiagnoseResponse { ref disease, .. })) if disease.as_deref() == Some("Flu")
        ));

        let event = perform(
            &api,
            ApiRequest::HealthQa(HealthQaRequest {
                question: "dengue".into(),
            }),
        )
        .await;
        assert!(matches!(
            event,
            ChatEvent::QaCompleted(Ok(HealthQaResponse { ref answer })) if answer == "About dengue"
        ));

        let event = perform(
            &api,
            ApiRequest::Suggest(SuggestRequest { text: "sk".into() }),
        )
        .await;
        assert!(matches!(
            event,
            ChatEvent::SuggestionsReceived(Ok(ref s)) if s == &vec!["skin_rash".to_string()]
        ));

        let event = perform(
            &api,
            ApiRequest::Followup(
                5,
                FollowupRequest {
                    disease: Some("Flu".into()),
                    ..Default::default()
                },
            ),
        )
        .await;
        assert!(matches!(event, ChatEvent::FollowupCompleted(5, Ok(_))));
    }

    #[tokio::test]
    async fn test_perform_passes_errors_through() {
        let api = CannedApi { offline: true };

        let event = perform(
            &api,
            ApiRequest::Diagnose(3, DiagnoseRequest::free_text("fever")),
        )
        .await;
        assert!(matches!(
            event,
            ChatEvent::DiagnosisCompleted(3, Err(ApiError::Network(_)))
        ));

        let event = perform(
            &api,
            ApiRequest::Suggest(SuggestRequest { text: "sk".into() }),
        )
        .await;
        assert!(matches!(
            event,
            ChatEvent::SuggestionsReceived(Err(ApiError::Server { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn test_round_trip_through_controller() {
        use crate::session::{Capabilities, ChatController, Effect};
        use crate::storage::MemoryStore;
        use crate::testing::RecordingPresenter;

        let api = CannedApi { offline: false };
        let mut controller = ChatController::new(MemoryStore::new(), Capabilities::default());
        let mut view = RecordingPresenter::default();

        let mut pending = controller.handle(ChatEvent::Submit("I have fever".into()), &mut view);
        while let Some(effect) = pending.pop() {
            if let Effect::Request(request) = effect {
                let completion = perform(&api, request).await;
                pending.extend(controller.handle(completion, &mut view));
            }
        }

        assert_eq!(view.last_result().map(|r| r.disease.as_str()), Some("Flu"));
        assert_eq!(controller.transcript().len(), 2);
    }
}
