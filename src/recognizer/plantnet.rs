//! Pl@ntNet 識別API クライアント

use super::{PlantNetResponse, RecognitionError, RecognitionService};
use crate::config::Config;
use crate::error::{PlantIdError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

const UPLOAD_FILE_NAME: &str = "resized_image.jpg";

/// Pl@ntNet クライアント
///
/// APIキーを保持するため Debug は実装しない。
pub struct PlantNetClient {
    client: reqwest::Client,
    base_url: String,
    project: String,
    lang: String,
    api_key: String,
}

impl PlantNetClient {
    pub fn new(api_key: String, config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PlantIdError::Config(format!("HTTPクライアント初期化失敗: {}", e.without_url())))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            lang: config.lang.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/identify/{}", self.base_url, self.project)
    }
}

#[async_trait]
impl RecognitionService for PlantNetClient {
    async fn recognize(&self, image: Vec<u8>) -> std::result::Result<PlantNetResponse, RecognitionError> {
        let part = Part::bytes(image)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str("image/jpeg")
            .map_err(RecognitionError::from_reqwest)?;
        let form = Form::new().part("images", part);

        debug!(project = %self.project, lang = %self.lang, "sending identification request");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[
                ("api-key", self.api_key.as_str()),
                ("include-related-images", "true"),
                ("no-reject", "true"),
                ("lang", self.lang.as_str()),
            ])
            .multipart(form)
            .send()
            .await
            .map_err(RecognitionError::from_reqwest)?;

        let status = response.status();
        debug!(status = status.as_u16(), "received identification response");
        if !status.is_success() {
            return Err(RecognitionError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(RecognitionError::from_reqwest)?;
        serde_json::from_slice(&body).map_err(|e| RecognitionError::Malformed(e.to_string()))
    }
}
