use super::error::PodcastServiceError;
use super::model::{StorageId, SynthesizedAudio, VoiceRequest};
use super::notification::{Notification, NotificationSink};
use super::state::GenerationOutput;
use super::voice::VoiceType;
use crate::infrastructure::repositories::{
    PlaybackUrlResolver, TtsRepository, UploadExecutor, UploadUrlIssuer,
};
use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(60);

const MISSING_PROMPT_TITLE: &str = "Please provide a prompt to generate a podcast";
const ALREADY_GENERATING_TITLE: &str = "A podcast is already being generated";
const SUCCESS_TITLE: &str = "Podcast generated successfully";
const FAILURE_TITLE: &str = "Error creating a podcast";

/// Synthesized audio keyed by voice and prompt
pub type SynthesisCache = Cache<(VoiceType, String), Bytes>;

pub fn new_synthesis_cache() -> SynthesisCache {
    Cache::builder()
        .max_capacity(100)
        .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
        .build()
}

/// Remote services a generation depends on, shared between workflow instances
#[derive(Clone)]
pub struct PodcastCollaborators {
    pub tts_repo: Arc<dyn TtsRepository>,
    pub upload_url_issuer: Arc<dyn UploadUrlIssuer>,
    pub upload_executor: Arc<dyn UploadExecutor>,
    pub url_resolver: Arc<dyn PlaybackUrlResolver>,
    pub cache: Option<SynthesisCache>,
    pub step_timeout: Duration,
}

impl PodcastCollaborators {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        upload_url_issuer: Arc<dyn UploadUrlIssuer>,
        upload_executor: Arc<dyn UploadExecutor>,
        url_resolver: Arc<dyn PlaybackUrlResolver>,
    ) -> Self {
        Self {
            tts_repo,
            upload_url_issuer,
            upload_executor,
            url_resolver,
            cache: None,
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    pub fn with_cache(mut self, cache: SynthesisCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }
}

/// Drives one generate, upload and publish cycle at a time.
pub struct PodcastGenerationWorkflow {
    collaborators: PodcastCollaborators,
    notifier: Arc<dyn NotificationSink>,
    in_flight: AtomicBool,
}

impl PodcastGenerationWorkflow {
    pub fn new(collaborators: PodcastCollaborators, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            collaborators,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[async_trait]
pub trait PodcastGenerationApi: Send + Sync {
    /// Generate podcast audio for `request` and publish it into `output`
    ///
    /// This operation:
    /// - Rejects blank prompts without touching the network
    /// - Synthesizes, packages and uploads the audio
    /// - Resolves a playback URL and publishes it as the active source
    /// - Emits exactly one notification per invocation
    ///
    /// The busy flag in `output` is cleared on every terminal path.
    async fn generate(
        &self,
        request: &VoiceRequest,
        output: &dyn GenerationOutput,
    ) -> Result<(), PodcastServiceError>;
}

#[async_trait]
impl PodcastGenerationApi for PodcastGenerationWorkflow {
    async fn generate(
        &self,
        request: &VoiceRequest,
        output: &dyn GenerationOutput,
    ) -> Result<(), PodcastServiceError> {
        let Some(mut guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::warn!(
                voice = %request.voice_type,
                "Podcast generation rejected, another one is in flight"
            );
            self.notifier
                .notify(Notification::destructive(ALREADY_GENERATING_TITLE));
            return Err(PodcastServiceError::Busy);
        };

        // 1. Begin: mark busy and hide any stale audio
        guard.mark_busy(output);
        output.publish_audio(None);

        // 2. Validate
        if !request.has_prompt() {
            tracing::warn!(voice = %request.voice_type, "Podcast generation rejected, empty prompt");
            self.notifier
                .notify(Notification::destructive(MISSING_PROMPT_TITLE));
            guard.clear_busy();
            return Err(PodcastServiceError::Invalid(
                "voice prompt is required".to_string(),
            ));
        }

        tracing::info!(
            voice = %request.voice_type,
            prompt_length = request.voice_prompt.len(),
            "Podcast generation started"
        );

        let start_time = Instant::now();

        // 3-5. Synthesize, package, upload and resolve
        match self.synthesize_and_publish(request, output).await {
            Ok(url) => {
                guard.clear_busy();
                self.notifier.notify(Notification::success(SUCCESS_TITLE));
                tracing::info!(
                    voice = %request.voice_type,
                    audio_url = %url,
                    latency_ms = start_time.elapsed().as_millis(),
                    "Podcast generation completed"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    voice = %request.voice_type,
                    latency_ms = start_time.elapsed().as_millis(),
                    "Error generating podcast"
                );
                self.notifier.notify(
                    Notification::destructive(FAILURE_TITLE).with_description(e.to_string()),
                );
                guard.clear_busy();
                Err(e)
            }
        }
    }
}

impl PodcastGenerationWorkflow {
    async fn synthesize_and_publish(
        &self,
        request: &VoiceRequest,
        output: &dyn GenerationOutput,
    ) -> Result<String, PodcastServiceError> {
        let audio = self.synthesize(request).await?;

        let file = audio.into_file();
        tracing::info!(
            filename = %file.filename,
            content_type = file.content_type,
            audio_size = file.len(),
            "Synthesized audio packaged"
        );

        let upload_url = self
            .bounded(
                "generate_upload_url",
                self.collaborators.upload_url_issuer.generate_upload_url(),
            )
            .await?;

        let storage_id = self
            .bounded(
                "upload",
                self.collaborators.upload_executor.upload(&upload_url, &file),
            )
            .await?;
        tracing::info!(storage_id = %storage_id, filename = %file.filename, "Podcast audio uploaded");
        output.publish_storage_id(&storage_id);

        let url = self.resolve(&storage_id).await?;
        output.publish_audio(Some(&url));

        Ok(url)
    }

    async fn synthesize(
        &self,
        request: &VoiceRequest,
    ) -> Result<SynthesizedAudio, PodcastServiceError> {
        let key = (request.voice_type, request.voice_prompt.clone());

        if let Some(cache) = &self.collaborators.cache {
            if let Some(cached) = cache.get(&key).await {
                tracing::info!(
                    voice = %request.voice_type,
                    cached_audio_size = cached.len(),
                    "TTS cache hit - reusing synthesized audio"
                );
                return Ok(SynthesizedAudio::new(cached));
            }
        }

        let data = self
            .bounded(
                "synthesize",
                self.collaborators
                    .tts_repo
                    .synthesize(request.voice_type, &request.voice_prompt),
            )
            .await?;

        if data.is_empty() {
            return Err(PodcastServiceError::Dependency(format!(
                "{} returned no audio",
                self.collaborators.tts_repo.provider_name()
            )));
        }

        let data = Bytes::from(data);
        if let Some(cache) = &self.collaborators.cache {
            cache.insert(key, data.clone()).await;
        }

        Ok(SynthesizedAudio::new(data))
    }

    async fn resolve(&self, storage_id: &StorageId) -> Result<String, PodcastServiceError> {
        self.bounded(
            "resolve_url",
            self.collaborators.url_resolver.resolve_url(storage_id),
        )
        .await?
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            PodcastServiceError::Dependency(format!(
                "no playback URL for storage id {}",
                storage_id
            ))
        })
    }

    /// Run one remote step under the configured timeout
    async fn bounded<T, F>(&self, step: &'static str, call: F) -> Result<T, PodcastServiceError>
    where
        F: Future<Output = Result<T, String>>,
    {
        let timeout = self.collaborators.step_timeout;
        match tokio::time::timeout(timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(PodcastServiceError::Dependency(format!("{}: {}", step, e))),
            Err(_) => Err(PodcastServiceError::Timeout { step, timeout }),
        }
    }
}

/// Holds the in-flight flag until dropped. Once busy has been published,
/// dropping the guard also clears it on the caller's output.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    output: Option<&'a dyn GenerationOutput>,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag, output: None })
    }

    fn mark_busy(&mut self, output: &'a dyn GenerationOutput) {
        output.publish_busy(true);
        self.output = Some(output);
    }

    fn clear_busy(&mut self) {
        if let Some(output) = self.output.take() {
            output.publish_busy(false);
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.output.is_some() {
            tracing::warn!("Podcast generation abandoned before completion");
        }
        self.clear_busy();
        self.flag.store(false, Ordering::Release);
    }
}
