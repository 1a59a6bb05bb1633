use podcast_studio::controllers::{files::FilesController, podcast::PodcastController};
use podcast_studio::domain::podcast::PodcastCollaborators;
use podcast_studio::infrastructure::http::build_router;
use podcast_studio::infrastructure::repositories::BaasStorageRepository;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod fake_tts;

use api_client::TestClient;
use fake_tts::FakeTts;
use storage_deployment::{DeploymentState, FakeStorageDeployment};

pub struct TestContext {
    pub client: TestClient,
    pub tts: Arc<FakeTts>,
    pub storage: Arc<DeploymentState>,
    pub storage_base_url: String,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let deployment = FakeStorageDeployment::start().await;
            let tts = Arc::new(FakeTts::default());

            let storage_repo = Arc::new(BaasStorageRepository::new(
                reqwest::Client::new(),
                deployment.base_url.clone(),
                None,
            ));
            let collaborators = PodcastCollaborators::new(
                tts.clone(),
                storage_repo.clone(),
                storage_repo.clone(),
                storage_repo.clone(),
            )
            .with_step_timeout(Duration::from_secs(5));

            let app = build_router(
                tts.clone(),
                Arc::new(FilesController::new(storage_repo)),
                Arc::new(PodcastController::new(collaborators)),
            );

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                tts,
                storage: deployment.state,
                storage_base_url: deployment.base_url,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}
