use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use navi_core::AudioOption;
use navi_logging::{navi_debug, navi_info};

const CLIP_NAME_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("no system voice is available")]
    NoVoice,
    #[error("io error while looking up a clip: {0}")]
    Io(#[from] std::io::Error),
}

/// How a line was voiced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance {
    Clip(PathBuf),
    Silent,
}

#[async_trait::async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str, option: AudioOption) -> Result<Utterance, SpeechError>;
}

/// Plays pre-recorded clips from a directory. The terminal has no system
/// voice, so anything without a clip reports [`SpeechError::NoVoice`].
#[derive(Debug, Clone)]
pub struct ClipSpeaker {
    audio_dir: PathBuf,
    lead_in: Duration,
}

impl ClipSpeaker {
    /// `lead_in` is the pause between a line appearing and it being voiced.
    pub fn new(audio_dir: PathBuf, lead_in: Duration) -> Self {
        Self { audio_dir, lead_in }
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    pub fn clip_path(&self, text: &str) -> PathBuf {
        self.audio_dir.join(clip_file_name(text))
    }
}

#[async_trait::async_trait]
impl Speaker for ClipSpeaker {
    async fn speak(&self, text: &str, option: AudioOption) -> Result<Utterance, SpeechError> {
        if option == AudioOption::Off {
            return Ok(Utterance::Silent);
        }
        tokio::time::sleep(self.lead_in).await;
        if option == AudioOption::Browser {
            return Err(SpeechError::NoVoice);
        }

        let path = self.clip_path(text);
        if !tokio::fs::try_exists(&path).await? {
            navi_debug!("no clip at {}; falling back to system voice", path.display());
            return Err(SpeechError::NoVoice);
        }
        navi_info!("playing {}", path.display());
        Ok(Utterance::Clip(path))
    }
}

/// File name of the clip for a bot line: the first 50 characters with
/// everything but ASCII letters, digits and whitespace removed.
pub fn clip_file_name(text: &str) -> String {
    let stem: String = text
        .chars()
        .take(CLIP_NAME_LIMIT)
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    format!("{}.wav", stem.trim())
}
