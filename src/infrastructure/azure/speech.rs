use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{instrument, warn};

use super::SUBSCRIPTION_KEY_HEADER;
use crate::domain::{ports::SpeechRecognizer, DomainError, UploadedFile};
use crate::infrastructure::{config::SpeechConfig, http_client};

const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";
const WAV_CONTENT_TYPE: &str = "audio/wav; codecs=audio/pcm; samplerate=16000";
const OGG_CONTENT_TYPE: &str = "audio/ogg; codecs=opus";

/// Single-shot recognition against the short-audio REST endpoint.
pub struct AzureSpeechRecognizer {
    client: Client,
    config: SpeechConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResult {
    recognition_status: String,
    #[serde(default)]
    display_text: Option<String>,
}

impl AzureSpeechRecognizer {
    pub fn new(config: SpeechConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            config,
        })
    }

    fn recognition_url(&self) -> String {
        format!("{}{}", self.config.base_url(), RECOGNITION_PATH)
    }
}

#[async_trait]
impl SpeechRecognizer for AzureSpeechRecognizer {
    #[instrument(skip(self, audio), fields(bytes = audio.len(), region = %self.config.region))]
    async fn recognize_once(&self, audio: &UploadedFile) -> Result<String, DomainError> {
        let content_type = if audio.is_ogg() {
            OGG_CONTENT_TYPE
        } else {
            WAV_CONTENT_TYPE
        };

        let response = self
            .client
            .post(self.recognition_url())
            .query(&[
                ("language", self.config.language.as_str()),
                ("format", "simple"),
            ])
            .header(SUBSCRIPTION_KEY_HEADER, self.config.key.expose_secret())
            .header(header::CONTENT_TYPE, content_type)
            .header(header::ACCEPT, "application/json")
            .body(audio.bytes.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "speech service rejected the request");
            return Err(DomainError::RecognitionFailed {
                status: format!("HTTP {}", status.as_u16()),
            });
        }

        let result: RecognitionResult = response.json().await?;
        match result.recognition_status.as_str() {
            "Success" => Ok(result.display_text.unwrap_or_default()),
            "NoMatch" | "InitialSilenceTimeout" => Err(DomainError::NoSpeechRecognized),
            other => {
                warn!(status = other, "speech recognition did not succeed");
                Err(DomainError::RecognitionFailed {
                    status: other.to_string(),
                })
            }
        }
    }
}
