use crate::domain::podcast::VoiceType;
use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying TTS provider (OpenAI, AWS Polly, etc.)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Mapping the requested voice to a provider voice
/// - Merging audio chunks into a single MP3 stream
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize `input` with the given voice
    ///
    /// Returns MP3 audio ready for playback
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, voice: VoiceType, input: &str) -> Result<Vec<u8>, String>;

    /// Short provider name used in logs and readiness checks
    fn provider_name(&self) -> &'static str;
}
