//! Navi engine: executes core effects off the UI thread.
mod document;
mod engine;
mod filename;
mod persist;
mod speech;
mod transcribe;
mod types;

pub use document::{escape_html, render_application};
pub use engine::{EngineError, EngineHandle, EngineSettings};
pub use filename::application_filename;
pub use persist::{prepare_directory, DocumentStore, PersistError};
pub use speech::{clip_file_name, ClipSpeaker, Speaker, SpeechError, Utterance};
pub use transcribe::{
    unwrap_transcript, HttpTranscriber, Transcriber, TranscriptionSettings,
    DEFAULT_TRANSCRIPTION_ENDPOINT,
};
pub use types::{EngineEvent, FailureKind, TranscriptionError};
