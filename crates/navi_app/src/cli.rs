//! Command-line arguments. Flags override values from the config file.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use navi_core::AudioOption;

use crate::platform::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "navi.ron";

/// Navi, a chat assistant for people settling in the USA.
#[derive(Parser, Debug)]
#[command(name = "navi", version, about)]
pub struct CliArgs {
    /// Path to the RON configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory for downloaded application documents.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// How bot lines are voiced.
    #[arg(short = 'a', long = "audio", value_enum)]
    pub audio: Option<AudioArg>,

    /// Where log lines go. The chat itself always uses the terminal.
    #[arg(long = "log", value_enum, default_value_t = LogArg::File)]
    pub log: LogArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioArg {
    Browser,
    Local,
    Off,
}

impl From<AudioArg> for AudioOption {
    fn from(arg: AudioArg) -> Self {
        match arg {
            AudioArg::Browser => AudioOption::Browser,
            AudioArg::Local => AudioOption::Local,
            AudioArg::Off => AudioOption::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    File,
    Terminal,
    Both,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::File => LogDestination::File,
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both,
        }
    }
}

impl CliArgs {
    /// Priority: --config flag > NAVI_CONFIG env var > ./navi.ron.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(path) = &self.config {
            return path.clone();
        }
        if let Ok(path) = std::env::var("NAVI_CONFIG") {
            return PathBuf::from(path);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let args = CliArgs::parse_from([
            "navi",
            "--config",
            "custom.ron",
            "--audio",
            "off",
            "--log",
            "both",
        ]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("custom.ron"));
        assert_eq!(args.audio.map(AudioOption::from), Some(AudioOption::Off));
        assert_eq!(args.log, LogArg::Both);
        assert_eq!(args.output_dir, None);
    }

    #[test]
    fn log_defaults_to_file() {
        let args = CliArgs::parse_from(["navi"]);
        assert_eq!(args.log, LogArg::File);
        assert_eq!(args.audio, None);
    }
}
