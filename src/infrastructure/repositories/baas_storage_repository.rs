use super::storage_repository::{PlaybackUrlResolver, UploadExecutor, UploadUrlIssuer};
use crate::domain::podcast::{StorageId, UploadableFile};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

const GENERATE_UPLOAD_URL_PATH: &str = "files:generateUploadUrl";
const GET_URL_PATH: &str = "files:getUrl";

/// Envelope returned by the deployment's `/api/mutation` and `/api/query` endpoints
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum FunctionResponse {
    Success {
        value: Value,
    },
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "storageId")]
    storage_id: StorageId,
}

/// Client for the file storage of a hosted backend deployment
pub struct BaasStorageRepository {
    http_client: reqwest::Client,
    deployment_url: String,
    admin_key: Option<String>,
}

impl BaasStorageRepository {
    pub fn new(
        http_client: reqwest::Client,
        deployment_url: String,
        admin_key: Option<String>,
    ) -> Self {
        Self {
            http_client,
            deployment_url: deployment_url.trim_end_matches('/').to_string(),
            admin_key,
        }
    }

    /// Call a deployment function and decode its value
    async fn call_function<T: DeserializeOwned>(
        &self,
        kind: &str,
        path: &str,
        args: Value,
    ) -> Result<T, String> {
        let url = format!("{}/api/{}", self.deployment_url, kind);
        let mut request = self.http_client.post(&url).json(&json!({
            "path": path,
            "args": args,
            "format": "json",
        }));
        if let Some(key) = &self.admin_key {
            request = request.header(AUTHORIZATION, format!("Convex {}", key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("{} request failed: {}", path, e))?;

        let status = response.status();
        if !status.is_success() && status.as_u16() != 400 {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("{} returned {}: {}", path, status, text));
        }

        match response
            .json::<FunctionResponse>()
            .await
            .map_err(|e| format!("{} returned an invalid body: {}", path, e))?
        {
            FunctionResponse::Success { value } => serde_json::from_value(value)
                .map_err(|e| format!("{} returned an unexpected value: {}", path, e)),
            FunctionResponse::Error { error_message } => {
                Err(format!("{} failed: {}", path, error_message))
            }
        }
    }
}

#[async_trait]
impl UploadUrlIssuer for BaasStorageRepository {
    async fn generate_upload_url(&self) -> Result<String, String> {
        let url: String = self
            .call_function("mutation", GENERATE_UPLOAD_URL_PATH, json!({}))
            .await?;
        tracing::debug!("Upload URL issued");
        Ok(url)
    }
}

#[async_trait]
impl UploadExecutor for BaasStorageRepository {
    async fn upload(&self, upload_url: &str, file: &UploadableFile) -> Result<StorageId, String> {
        let response = self
            .http_client
            .post(upload_url)
            .header(CONTENT_TYPE, file.content_type)
            .body(file.data.clone())
            .send()
            .await
            .map_err(|e| format!("upload of {} failed: {}", file.filename, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!(
                "upload of {} returned {}: {}",
                file.filename, status, text
            ));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| format!("upload of {} returned an invalid body: {}", file.filename, e))?;

        Ok(body.storage_id)
    }
}

#[async_trait]
impl PlaybackUrlResolver for BaasStorageRepository {
    async fn resolve_url(&self, storage_id: &StorageId) -> Result<Option<String>, String> {
        self.call_function("query", GET_URL_PATH, json!({ "storageId": storage_id }))
            .await
    }
}
