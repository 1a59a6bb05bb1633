pub mod baas_storage_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod storage_repository;
pub mod text_batches;
pub mod tts_repository;

pub use baas_storage_repository::BaasStorageRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use storage_repository::{PlaybackUrlResolver, UploadExecutor, UploadUrlIssuer};
pub use tts_repository::TtsRepository;
