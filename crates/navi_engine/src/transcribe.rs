use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use url::Url;

use navi_core::AudioClip;
use navi_logging::navi_debug;

use crate::{FailureKind, TranscriptionError};

pub const DEFAULT_TRANSCRIPTION_ENDPOINT: &str = "https://localhost:8000/transcript";

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSCRIPTION_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError>;
}

/// Posts the recording as multipart field `audio` and reads the transcript
/// from the response body.
#[derive(Debug, Clone)]
pub struct HttpTranscriber {
    settings: TranscriptionSettings,
    client: reqwest::Client,
}

impl HttpTranscriber {
    pub fn new(settings: TranscriptionSettings) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TranscriptionError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }
}

#[async_trait::async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError> {
        if clip.bytes.is_empty() {
            return Err(TranscriptionError::new(
                FailureKind::InvalidAudio,
                "recording is empty",
            ));
        }
        let endpoint = Url::parse(&self.settings.endpoint)
            .map_err(|err| TranscriptionError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TranscriptionError::new(
                FailureKind::InvalidEndpoint,
                format!("unsupported scheme {}", endpoint.scheme()),
            ));
        }

        let part = Part::bytes(clip.bytes.clone())
            .file_name(upload_name(clip))
            .mime_str(&clip.mime_type)
            .map_err(|err| TranscriptionError::new(FailureKind::InvalidAudio, err.to_string()))?;
        let form = Form::new().part("audio", part);

        navi_debug!(
            "posting {} bytes of {} to {}",
            clip.bytes.len(),
            clip.mime_type,
            endpoint
        );
        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptionError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let transcript = unwrap_transcript(&body);
        if transcript.is_empty() {
            return Err(TranscriptionError::new(
                FailureKind::EmptyTranscript,
                "service returned no text",
            ));
        }
        Ok(transcript)
    }
}

/// Accepts a plain-text body, a JSON string, or a JSON object carrying a
/// `text` or `transcript` field.
pub fn unwrap_transcript(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(text)) => text.trim().to_string(),
        Ok(Value::Object(fields)) => ["text", "transcript"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        _ => trimmed.to_string(),
    }
}

fn upload_name(clip: &AudioClip) -> String {
    let extension = clip
        .mime_type
        .split(';')
        .next()
        .and_then(|essence| essence.split('/').nth(1))
        .filter(|subtype| !subtype.is_empty())
        .unwrap_or("wav");
    format!("recording.{extension}")
}

fn map_reqwest_error(err: reqwest::Error) -> TranscriptionError {
    if err.is_timeout() {
        return TranscriptionError::new(FailureKind::Timeout, err.to_string());
    }
    TranscriptionError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_bodies_are_unwrapped() {
        assert_eq!(unwrap_transcript(r#"{"text": " hola "}"#), "hola");
        assert_eq!(unwrap_transcript(r#"{"transcript": "hi"}"#), "hi");
        assert_eq!(unwrap_transcript(r#""quoted""#), "quoted");
        assert_eq!(unwrap_transcript(r#"{"other": 1}"#), "");
        assert_eq!(unwrap_transcript("plain words\n"), "plain words");
    }

    #[test]
    fn upload_name_follows_mime_type() {
        let clip = AudioClip {
            source: "a".into(),
            mime_type: "audio/webm;codecs=opus".into(),
            bytes: vec![0],
        };
        assert_eq!(upload_name(&clip), "recording.webm");
    }
}
