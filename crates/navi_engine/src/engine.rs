use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use navi_core::{
    ApplicationForm, AudioClip, AudioOption, DelayTicket, DocumentId, MessageId, TranscriptionId,
};
use navi_logging::{navi_debug, navi_error, navi_info, navi_warn};

use crate::document::render_application;
use crate::filename::application_filename;
use crate::persist::DocumentStore;
use crate::speech::{ClipSpeaker, Speaker};
use crate::transcribe::{HttpTranscriber, Transcriber, TranscriptionSettings};
use crate::{EngineEvent, TranscriptionError};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub transcription: TranscriptionSettings,
    pub output_dir: PathBuf,
    pub audio_dir: PathBuf,
    /// Pause before a bot line is voiced.
    pub speech_delay: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            transcription: TranscriptionSettings::default(),
            output_dir: PathBuf::from("applications"),
            audio_dir: PathBuf::from("audio"),
            speech_delay: Duration::from_millis(800),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to set up transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("failed to start engine thread: {0}")]
    Thread(String),
}

enum EngineCommand {
    Delay {
        ticket: DelayTicket,
        duration: Duration,
    },
    Cancel {
        ticket: DelayTicket,
    },
    Transcribe {
        id: TranscriptionId,
        clip: AudioClip,
    },
    Speak {
        message_id: MessageId,
        text: String,
        option: AudioOption,
    },
    WriteDocument {
        id: DocumentId,
        form: Box<ApplicationForm>,
    },
}

struct Workers {
    transcriber: Arc<dyn Transcriber>,
    speaker: Arc<dyn Speaker>,
    store: DocumentStore,
    timers: Arc<Mutex<HashMap<DelayTicket, CancellationToken>>>,
}

/// Runs effects on a background tokio runtime and reports back over a
/// channel the app polls.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let transcriber = HttpTranscriber::new(settings.transcription.clone())?;
        let speaker = ClipSpeaker::new(settings.audio_dir.clone(), settings.speech_delay);
        Self::with_workers(
            Arc::new(transcriber),
            Arc::new(speaker),
            DocumentStore::new(settings.output_dir),
        )
    }

    /// Builds an engine around caller-supplied workers.
    pub fn with_workers(
        transcriber: Arc<dyn Transcriber>,
        speaker: Arc<dyn Speaker>,
        store: DocumentStore,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let workers = Workers {
            transcriber,
            speaker,
            store,
            timers: Arc::new(Mutex::new(HashMap::new())),
        };

        thread::Builder::new()
            .name("navi-engine".into())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    dispatch(&runtime, &workers, command, &event_tx);
                }
                navi_debug!("engine command channel closed");
            })
            .map_err(|err| EngineError::Thread(err.to_string()))?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn schedule_delay(&self, ticket: DelayTicket, duration: Duration) {
        self.send(EngineCommand::Delay { ticket, duration });
    }

    pub fn cancel_delay(&self, ticket: DelayTicket) {
        self.send(EngineCommand::Cancel { ticket });
    }

    pub fn transcribe(&self, id: TranscriptionId, clip: AudioClip) {
        self.send(EngineCommand::Transcribe { id, clip });
    }

    pub fn speak(&self, message_id: MessageId, text: impl Into<String>, option: AudioOption) {
        self.send(EngineCommand::Speak {
            message_id,
            text: text.into(),
            option,
        });
    }

    pub fn write_document(&self, id: DocumentId, form: ApplicationForm) {
        self.send(EngineCommand::WriteDocument {
            id,
            form: Box::new(form),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            navi_error!("engine thread is gone; command dropped");
        }
    }
}

fn dispatch(
    runtime: &tokio::runtime::Runtime,
    workers: &Workers,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let event_tx = event_tx.clone();
    match command {
        EngineCommand::Delay { ticket, duration } => {
            let token = CancellationToken::new();
            if let Ok(mut timers) = workers.timers.lock() {
                if let Some(previous) = timers.insert(ticket, token.clone()) {
                    previous.cancel();
                }
            }
            let timers = workers.timers.clone();
            runtime.spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        navi_debug!("delay {:?} cancelled", ticket);
                    }
                    _ = tokio::time::sleep(duration) => {
                        if let Ok(mut timers) = timers.lock() {
                            timers.remove(&ticket);
                        }
                        let _ = event_tx.send(EngineEvent::DelayElapsed { ticket });
                    }
                }
            });
        }
        EngineCommand::Cancel { ticket } => {
            let token = workers
                .timers
                .lock()
                .ok()
                .and_then(|mut timers| timers.remove(&ticket));
            match token {
                Some(token) => token.cancel(),
                None => navi_debug!("delay {:?} already finished", ticket),
            }
        }
        EngineCommand::Transcribe { id, clip } => {
            let transcriber = workers.transcriber.clone();
            runtime.spawn(async move {
                let result = transcriber.transcribe(&clip).await;
                if let Err(err) = &result {
                    navi_warn!("transcription {:?} failed: {}", id, err);
                }
                let _ = event_tx.send(EngineEvent::TranscriptionFinished { id, result });
            });
        }
        EngineCommand::Speak {
            message_id,
            text,
            option,
        } => {
            let speaker = workers.speaker.clone();
            runtime.spawn(async move {
                let result = speaker.speak(&text, option).await;
                let _ = event_tx.send(EngineEvent::SpeechFinished { message_id, result });
            });
        }
        EngineCommand::WriteDocument { id, form } => {
            let store = workers.store.clone();
            runtime.spawn_blocking(move || {
                let file_name = application_filename(&form);
                let html = render_application(&form);
                let result = store.save(&file_name, &html);
                match &result {
                    Ok(path) => navi_info!("wrote {}", path.display()),
                    Err(err) => navi_error!("could not write {}: {}", file_name, err),
                }
                let _ = event_tx.send(EngineEvent::DocumentWritten { id, result });
            });
        }
    }
}
