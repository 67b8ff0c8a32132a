use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use navi_core::{AudioOption, DelayKind, Language, Settings};
use navi_engine::{EngineSettings, TranscriptionSettings, DEFAULT_TRANSCRIPTION_ENDPOINT};
use navi_logging::{navi_info, navi_warn};
use serde::{Deserialize, Serialize};

use crate::cli::CliArgs;

/// Contents of `navi.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaviConfig {
    pub transcription_endpoint: String,
    pub transcription_timeout_ms: u64,
    pub processing_delay_ms: u64,
    pub autofill_delay_ms: u64,
    pub speech_delay_ms: u64,
    pub output_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub audio_option: AudioOption,
    pub language: Language,
}

impl Default for NaviConfig {
    fn default() -> Self {
        Self {
            transcription_endpoint: DEFAULT_TRANSCRIPTION_ENDPOINT.to_string(),
            transcription_timeout_ms: 30_000,
            processing_delay_ms: 3_000,
            autofill_delay_ms: 2_000,
            speech_delay_ms: 800,
            output_dir: PathBuf::from("applications"),
            audio_dir: PathBuf::from("audio"),
            // The terminal has no system voice; prerecorded clips are the only option.
            audio_option: AudioOption::Local,
            language: Language::English,
        }
    }
}

/// Reads the config file. A missing file gives the defaults silently; an
/// unreadable or malformed one gives the defaults with a warning.
pub fn load(path: &Path) -> NaviConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            navi_info!("no config at {:?}; using defaults", path);
            return NaviConfig::default();
        }
        Err(err) => {
            navi_warn!("failed to read config from {:?}: {}", path, err);
            return NaviConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            navi_info!("loaded config from {:?}", path);
            config
        }
        Err(err) => {
            navi_warn!("failed to parse config from {:?}: {}", path, err);
            NaviConfig::default()
        }
    }
}

impl NaviConfig {
    pub fn apply_overrides(&mut self, args: &CliArgs) {
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(audio) = args.audio {
            self.audio_option = audio.into();
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            language: self.language,
            audio: self.audio_option,
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            transcription: TranscriptionSettings {
                endpoint: self.transcription_endpoint.clone(),
                request_timeout: Duration::from_millis(self.transcription_timeout_ms),
                ..TranscriptionSettings::default()
            },
            output_dir: self.output_dir.clone(),
            audio_dir: self.audio_dir.clone(),
            speech_delay: Duration::from_millis(self.speech_delay_ms),
        }
    }

    pub fn delays(&self) -> Delays {
        Delays {
            processing: Duration::from_millis(self.processing_delay_ms),
            autofill: Duration::from_millis(self.autofill_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    pub processing: Duration,
    pub autofill: Duration,
}

impl Delays {
    pub fn for_kind(&self, kind: DelayKind) -> Duration {
        match kind {
            DelayKind::Processing => self.processing,
            DelayKind::Autofill => self.autofill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load(&temp.path().join("navi.ron")), NaviConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("navi.ron");
        fs::write(
            &path,
            "(processing_delay_ms: 10, audio_option: off, language: es)",
        )
        .unwrap();

        let config = load(&path);
        assert_eq!(config.processing_delay_ms, 10);
        assert_eq!(config.audio_option, AudioOption::Off);
        assert_eq!(config.language, Language::Spanish);
        assert_eq!(config.autofill_delay_ms, 2_000);
        assert_eq!(config.delays().for_kind(DelayKind::Processing), Duration::from_millis(10));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("navi.ron");
        fs::write(&path, "(processing_delay_ms: \"soon\"").unwrap();

        assert_eq!(load(&path), NaviConfig::default());
    }

    #[test]
    fn cli_flags_override_file_values() {
        let mut config = NaviConfig::default();
        let args = CliArgs::parse_from(["navi", "--output-dir", "/tmp/forms", "--audio", "off"]);

        config.apply_overrides(&args);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/forms"));
        assert_eq!(config.settings().audio, AudioOption::Off);
    }
}
