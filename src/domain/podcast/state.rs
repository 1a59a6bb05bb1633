use super::model::StorageId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Output port through which the workflow publishes into caller-owned state
pub trait GenerationOutput: Send + Sync {
    /// `None` clears the active audio source
    fn publish_audio(&self, url: Option<&str>);
    fn publish_storage_id(&self, storage_id: &StorageId);
    fn publish_busy(&self, is_generating: bool);
}

/// Snapshot of the view state driven by a generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationState {
    pub audio: Option<String>,
    pub audio_storage_id: Option<StorageId>,
    pub audio_duration: Option<f64>,
    pub is_generating: bool,
}

/// Caller-owned holder of a [`GenerationState`]
#[derive(Debug, Default)]
pub struct GenerationStateHolder {
    state: Mutex<GenerationState>,
}

impl GenerationStateHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> GenerationState {
        self.state.lock().clone()
    }

    /// Set by the player once the audio metadata is loaded, never by the workflow
    pub fn set_audio_duration(&self, seconds: f64) {
        self.state.lock().audio_duration = Some(seconds);
    }
}

impl GenerationOutput for GenerationStateHolder {
    fn publish_audio(&self, url: Option<&str>) {
        let mut state = self.state.lock();
        state.audio = url.filter(|u| !u.is_empty()).map(str::to_string);
        // a new source invalidates the previous duration
        state.audio_duration = None;
    }

    fn publish_storage_id(&self, storage_id: &StorageId) {
        self.state.lock().audio_storage_id = Some(storage_id.clone());
    }

    fn publish_busy(&self, is_generating: bool) {
        self.state.lock().is_generating = is_generating;
    }
}
