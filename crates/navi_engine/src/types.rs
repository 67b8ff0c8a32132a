use std::fmt;
use std::path::PathBuf;

use navi_core::{DelayTicket, DocumentId, MessageId, TranscriptionId};

use crate::persist::PersistError;
use crate::speech::{SpeechError, Utterance};

/// Completion reports sent back to the app loop.
#[derive(Debug)]
pub enum EngineEvent {
    DelayElapsed {
        ticket: DelayTicket,
    },
    TranscriptionFinished {
        id: TranscriptionId,
        result: Result<String, TranscriptionError>,
    },
    SpeechFinished {
        message_id: MessageId,
        result: Result<Utterance, SpeechError>,
    },
    DocumentWritten {
        id: DocumentId,
        result: Result<PathBuf, PersistError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionError {
    pub kind: FailureKind,
    pub message: String,
}

impl TranscriptionError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TranscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TranscriptionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidAudio,
    HttpStatus(u16),
    Timeout,
    EmptyTranscript,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid transcription endpoint"),
            FailureKind::InvalidAudio => write!(f, "invalid audio clip"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::EmptyTranscript => write!(f, "empty transcript"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
