use async_trait::async_trait;
use parking_lot::Mutex;
use podcast_studio::domain::podcast::VoiceType;
use podcast_studio::infrastructure::repositories::TtsRepository;
use std::sync::atomic::{AtomicBool, Ordering};

pub fn mock_audio_bytes() -> Vec<u8> {
    // Minimal MP3 frame header followed by padding
    vec![0xFF, 0xFB, 0x90, 0x00, 0x00, 0x00, 0x00, 0x00]
}

/// Synthesis backend that answers with a fixed MP3 payload
#[derive(Default)]
pub struct FakeTts {
    pub requests: Mutex<Vec<(VoiceType, String)>>,
    pub fail: AtomicBool,
}

impl FakeTts {
    pub fn requests(&self) -> Vec<(VoiceType, String)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TtsRepository for FakeTts {
    async fn synthesize(&self, voice: VoiceType, input: &str) -> Result<Vec<u8>, String> {
        self.requests.lock().push((voice, input.to_string()));
        if self.fail.load(Ordering::SeqCst) {
            return Err("Rate limit reached for tts-1".to_string());
        }
        Ok(mock_audio_bytes())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
