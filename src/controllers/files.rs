use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::UploadUrlIssuer,
};

/// Response for POST /api/files/generate-upload-url
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadUrlResponse {
    pub upload_url: String,
}

pub struct FilesController {
    upload_url_issuer: Arc<dyn UploadUrlIssuer>,
}

impl FilesController {
    pub fn new(upload_url_issuer: Arc<dyn UploadUrlIssuer>) -> Self {
        Self { upload_url_issuer }
    }

    /// POST /api/files/generate-upload-url - Issue a one-time upload URL
    pub async fn generate_upload_url(
        State(controller): State<Arc<FilesController>>,
    ) -> AppResult<Json<UploadUrlResponse>> {
        let upload_url = controller
            .upload_url_issuer
            .generate_upload_url()
            .await
            .map_err(AppError::ExternalService)?;

        Ok(Json(UploadUrlResponse { upload_url }))
    }
}
