use super::voice::VoiceType;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// Input to a podcast generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceRequest {
    pub voice_type: VoiceType,
    #[serde(default)]
    pub voice_prompt: String,
}

impl VoiceRequest {
    pub fn new(voice_type: VoiceType, voice_prompt: impl Into<String>) -> Self {
        Self {
            voice_type,
            voice_prompt: voice_prompt.into(),
        }
    }

    /// Whitespace-only prompts count as missing
    pub fn has_prompt(&self) -> bool {
        !self.voice_prompt.trim().is_empty()
    }
}

/// Raw MP3 bytes returned by the synthesis backend
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Bytes,
}

impl SynthesizedAudio {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Package the audio under a fresh `podcast-<uuid>.mp3` name
    pub fn into_file(self) -> UploadableFile {
        UploadableFile {
            filename: format!("podcast-{}.mp3", Uuid::new_v4()),
            content_type: AUDIO_MIME_TYPE,
            data: self.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadableFile {
    pub filename: String,
    pub content_type: &'static str,
    pub data: Bytes,
}

impl UploadableFile {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Opaque handle issued by the storage provider for an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageId(pub String);

impl StorageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StorageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for StorageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
