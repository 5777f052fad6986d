use serde::Deserialize;

use crate::domain::repository::ImageStorePort;
use crate::error::ApiError;

/// Cloudinary unsigned upload. Accepts a data URI or raw base64 payload and
/// returns the hosted image URL.
#[derive(Clone)]
pub struct CloudinaryImageStore {
    pub http: reqwest::Client,
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl ImageStorePort for CloudinaryImageStore {
    async fn upload_base64(&self, payload: &str) -> Result<String, ApiError> {
        if self.cloud_name.is_empty() {
            return Err(ApiError::Upstream("image store not configured".into()));
        }

        // Cloudinary wants a data URI; raw base64 gets a default prefix.
        let file = if payload.starts_with("data:") {
            payload.to_owned()
        } else {
            format!("data:image/png;base64,{payload}")
        };

        let form = [
            ("file", file.as_str()),
            ("upload_preset", self.upload_preset.as_str()),
        ];

        let resp = self
            .http
            .post(format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                self.cloud_name
            ))
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("cloudinary upload: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "cloudinary upload: status {}",
                resp.status()
            )));
        }

        let out: UploadResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("cloudinary upload: {e}")))?;
        Ok(out.secure_url)
    }
}
