use std::path::Path;

use chrono::Utc;
use navi_core::{AudioClip, Capability, Effect, MicrophoneIssue, Msg};
use navi_engine::{EngineEvent, EngineHandle, SpeechError, Utterance};
use navi_logging::{navi_debug, navi_info, navi_warn};

use super::config::Delays;

/// Hands core effects to the engine and turns engine reports back into
/// messages for the update loop.
pub struct EffectRunner {
    engine: EngineHandle,
    delays: Delays,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, delays: Delays) -> Self {
        Self { engine, delays }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Speak {
                    message_id,
                    text,
                    option,
                } => {
                    navi_debug!("Speak message_id={} option={:?}", message_id.0, option);
                    self.engine.speak(message_id, text, option);
                }
                Effect::ScheduleDelay { ticket, kind } => {
                    let duration = self.delays.for_kind(kind);
                    navi_info!(
                        "ScheduleDelay ticket={} kind={:?} ms={}",
                        ticket.0,
                        kind,
                        duration.as_millis()
                    );
                    self.engine.schedule_delay(ticket, duration);
                }
                Effect::CancelDelay { ticket } => {
                    navi_info!("CancelDelay ticket={}", ticket.0);
                    self.engine.cancel_delay(ticket);
                }
                Effect::Transcribe { id, clip } => {
                    navi_info!(
                        "Transcribe id={} bytes={} mime={}",
                        id.0,
                        clip.bytes.len(),
                        clip.mime_type
                    );
                    self.engine.transcribe(id, clip);
                }
                Effect::RenderApplication { id, form } => {
                    navi_info!(
                        "RenderApplication id={} listing={:?}",
                        id.0,
                        form.listing.key()
                    );
                    self.engine.write_document(id, form);
                }
            }
        }
    }

    /// Drains finished engine work without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .filter_map(to_msg)
            .collect()
    }
}

fn to_msg(event: EngineEvent) -> Option<Msg> {
    let at = Utc::now();
    match event {
        EngineEvent::DelayElapsed { ticket } => Some(Msg::DelayElapsed { ticket, at }),
        EngineEvent::TranscriptionFinished { id, result } => Some(Msg::TranscriptionFinished {
            id,
            transcript: result.ok(),
            at,
        }),
        EngineEvent::SpeechFinished { message_id, result } => match result {
            Ok(Utterance::Clip(path)) => {
                navi_debug!("message {} voiced from {}", message_id.0, path.display());
                None
            }
            Ok(Utterance::Silent) => None,
            Err(SpeechError::NoVoice) => Some(Msg::CapabilityMissing {
                capability: Capability::Speech { message_id },
                at,
            }),
            Err(err) => {
                navi_warn!("speech for message {} failed: {}", message_id.0, err);
                Some(Msg::CapabilityMissing {
                    capability: Capability::Speech { message_id },
                    at,
                })
            }
        },
        EngineEvent::DocumentWritten { id, result } => Some(match result {
            Ok(path) => Msg::DocumentSaved {
                id,
                file_name: path.display().to_string(),
                at,
            },
            Err(_) => Msg::DocumentFailed { id, at },
        }),
    }
}

/// Loads a recording from disk, standing in for the microphone. Problems map
/// to the microphone failures the chat knows how to explain.
pub fn record_from_file(path: &Path) -> Msg {
    let at = Utc::now();
    let Some(mime_type) = audio_mime_type(path) else {
        return Msg::CapabilityMissing {
            capability: Capability::Microphone(MicrophoneIssue::Unsupported),
            at,
        };
    };

    match std::fs::read(path) {
        Ok(bytes) => Msg::AudioRecorded {
            clip: AudioClip {
                source: path.display().to_string(),
                mime_type: mime_type.to_string(),
                bytes,
            },
            at,
        },
        Err(err) => {
            navi_warn!("could not read recording {:?}: {}", path, err);
            let issue = match err.kind() {
                std::io::ErrorKind::NotFound => MicrophoneIssue::NotFound,
                std::io::ErrorKind::PermissionDenied => MicrophoneIssue::PermissionDenied,
                _ => MicrophoneIssue::Other,
            };
            Msg::CapabilityMissing {
                capability: Capability::Microphone(issue),
                at,
            }
        }
    }
}

fn audio_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "wav" => Some("audio/wav"),
        "webm" => Some("audio/webm"),
        "ogg" | "oga" => Some("audio/ogg"),
        "mp3" => Some("audio/mpeg"),
        "m4a" => Some("audio/mp4"),
        _ => None,
    }
}
