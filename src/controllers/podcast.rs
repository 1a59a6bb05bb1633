use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    domain::podcast::{
        GenerationOutcome, GenerationStateHolder, NotificationLog, PodcastCollaborators,
        PodcastGenerationApi, PodcastGenerationWorkflow, VoiceRequest,
    },
    error::AppError,
};

pub struct PodcastController {
    collaborators: PodcastCollaborators,
}

impl PodcastController {
    pub fn new(collaborators: PodcastCollaborators) -> Self {
        Self { collaborators }
    }

    /// POST /api/podcasts/generate - Synthesize, upload and publish a podcast
    ///
    /// The body always carries the final state and the notifications emitted;
    /// the status code reflects how the generation ended.
    pub async fn generate(
        State(controller): State<Arc<PodcastController>>,
        Json(request): Json<VoiceRequest>,
    ) -> (StatusCode, Json<GenerationOutcome>) {
        let notifications = Arc::new(NotificationLog::new());
        let state = GenerationStateHolder::new();
        let workflow =
            PodcastGenerationWorkflow::new(controller.collaborators.clone(), notifications.clone());

        let status = match workflow.generate(&request, &state).await {
            Ok(()) => StatusCode::OK,
            Err(e) => AppError::from(e).status_code(),
        };

        (
            status,
            Json(GenerationOutcome {
                state: state.snapshot(),
                notifications: notifications.entries(),
                generated_at: Utc::now(),
            }),
        )
    }
}
