use crate::domain::ports::ImageStore;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

/// Client for the external image host. Uploads return the public URI the
/// host assigned; deletes are issued by URI.
pub struct HttpImageStore {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpImageStore {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn store(&self, filename: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Image service connection error: {}", e);
                AppError::Internal
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            error!("Image upload failed. Status: {}, Body: {}", status, text);
            return Err(AppError::Internal);
        }

        let body: UploadResponse = res.json().await.map_err(|e| {
            error!("Image service returned invalid JSON: {}", e);
            AppError::Internal
        })?;

        Ok(body.url)
    }

    async fn delete(&self, uri: &str) -> Result<(), AppError> {
        let res = self.client.delete(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .query(&[("url", uri)])
            .send()
            .await
            .map_err(|e| {
                error!("Image service connection error: {}", e);
                AppError::Internal
            })?;

        if !res.status().is_success() {
            error!("Image delete failed. Status: {}", res.status());
            return Err(AppError::Internal);
        }

        Ok(())
    }
}
