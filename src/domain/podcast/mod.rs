pub mod error;
pub mod model;
pub mod notification;
pub mod service;
pub mod state;
pub mod voice;

pub use error::PodcastServiceError;
pub use model::{StorageId, SynthesizedAudio, UploadableFile, VoiceRequest, AUDIO_MIME_TYPE};
pub use notification::{Notification, NotificationLog, NotificationSink, Severity};
pub use service::{
    new_synthesis_cache, PodcastCollaborators, PodcastGenerationApi, PodcastGenerationWorkflow,
    SynthesisCache,
};
pub use state::{GenerationOutput, GenerationState, GenerationStateHolder};
pub use voice::VoiceType;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response for POST /api/podcasts/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationOutcome {
    #[serde(flatten)]
    pub state: GenerationState,
    pub notifications: Vec<Notification>,
    pub generated_at: DateTime<Utc>,
}
