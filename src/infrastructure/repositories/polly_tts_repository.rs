use super::text_batches::split_into_batches;
use super::tts_repository::TtsRepository;
use crate::domain::podcast::VoiceType;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Closest neural Polly voice for each voice type
    fn polly_voice(voice: VoiceType) -> &'static str {
        match voice {
            VoiceType::Alloy => "Joanna",
            VoiceType::Echo => "Matthew",
            VoiceType::Fable => "Amy",
            VoiceType::Onyx => "Brian",
            VoiceType::Nova => "Ivy",
            VoiceType::Shimmer => "Kendra",
        }
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(&self, text: &str, voice: VoiceType) -> Result<Vec<u8>, String> {
        let voice_name = Self::polly_voice(voice);

        tracing::debug!(
            voice = %voice,
            polly_voice = voice_name,
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice_name))
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    polly_voice = voice_name,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, voice: VoiceType, input: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(input, MAX_BATCH_SIZE);
        let mut merged_audio = Vec::new();
        for batch in &batches {
            merged_audio.extend(self.call_polly(batch, voice).await?);
        }

        tracing::info!(
            provider = "polly",
            voice = %voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = input.chars().count(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }

    fn provider_name(&self) -> &'static str {
        "polly"
    }
}
