use std::sync::Arc;
use std::time::{Duration, Instant};

use navi_core::{AudioClip, AudioOption, DelayTicket, MessageId, TranscriptionId};
use navi_engine::{
    ClipSpeaker, DocumentStore, EngineEvent, EngineHandle, FailureKind, Transcriber,
    TranscriptionError, Utterance,
};
use tempfile::TempDir;

struct CannedTranscriber(Result<String, TranscriptionError>);

#[async_trait::async_trait]
impl Transcriber for CannedTranscriber {
    async fn transcribe(&self, _clip: &AudioClip) -> Result<String, TranscriptionError> {
        self.0.clone()
    }
}

fn engine(transcript: Result<String, TranscriptionError>, temp: &TempDir) -> EngineHandle {
    EngineHandle::with_workers(
        Arc::new(CannedTranscriber(transcript)),
        Arc::new(ClipSpeaker::new(temp.path().to_path_buf(), Duration::ZERO)),
        DocumentStore::new(temp.path().join("docs")),
    )
    .expect("engine")
}

fn next_event(engine: &EngineHandle, within: Duration) -> Option<EngineEvent> {
    engine.recv_timeout(within)
}

#[test]
fn delay_reports_its_ticket() {
    navi_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let engine = engine(Ok("unused".into()), &temp);

    let started = Instant::now();
    engine.schedule_delay(DelayTicket(3), Duration::from_millis(30));

    match next_event(&engine, Duration::from_secs(2)) {
        Some(EngineEvent::DelayElapsed { ticket }) => assert_eq!(ticket, DelayTicket(3)),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[test]
fn cancelled_delay_never_fires() {
    navi_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let engine = engine(Ok("unused".into()), &temp);

    engine.schedule_delay(DelayTicket(1), Duration::from_millis(80));
    engine.cancel_delay(DelayTicket(1));
    engine.schedule_delay(DelayTicket(2), Duration::from_millis(120));

    match next_event(&engine, Duration::from_secs(2)) {
        Some(EngineEvent::DelayElapsed { ticket }) => assert_eq!(ticket, DelayTicket(2)),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(next_event(&engine, Duration::from_millis(150)).is_none());
}

#[test]
fn transcription_result_is_forwarded() {
    navi_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let failure = TranscriptionError {
        kind: FailureKind::Network,
        message: "connection refused".into(),
    };
    let engine = engine(Err(failure.clone()), &temp);

    engine.transcribe(
        TranscriptionId(9),
        AudioClip {
            source: "a.wav".into(),
            mime_type: "audio/wav".into(),
            bytes: vec![1],
        },
    );

    match next_event(&engine, Duration::from_secs(2)) {
        Some(EngineEvent::TranscriptionFinished { id, result }) => {
            assert_eq!(id, TranscriptionId(9));
            assert_eq!(result, Err(failure));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn local_clip_is_played_when_present() {
    navi_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("Do you have any pets.wav"), b"RIFF").unwrap();
    let engine = engine(Ok("unused".into()), &temp);

    engine.speak(MessageId(4), "Do you have any pets?", AudioOption::Local);

    match next_event(&engine, Duration::from_secs(2)) {
        Some(EngineEvent::SpeechFinished { message_id, result }) => {
            assert_eq!(message_id, MessageId(4));
            assert_eq!(
                result.unwrap(),
                Utterance::Clip(temp.path().join("Do you have any pets.wav"))
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn missing_clip_reports_no_voice() {
    navi_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let engine = engine(Ok("unused".into()), &temp);

    engine.speak(MessageId(5), "What's your maximum rent budget?", AudioOption::Local);

    match next_event(&engine, Duration::from_secs(2)) {
        Some(EngineEvent::SpeechFinished { result, .. }) => {
            assert!(matches!(result, Err(navi_engine::SpeechError::NoVoice)));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn document_is_written_to_output_dir() {
    navi_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let engine = engine(Ok("unused".into()), &temp);
    let listing = navi_core::listings(navi_core::Service::Housing)[0];
    let form = navi_core::ApplicationForm::autofill(
        &navi_core::UserProfile::default(),
        listing,
        chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    );

    engine.write_document(navi_core::DocumentId(3), form);

    match next_event(&engine, Duration::from_secs(2)) {
        Some(EngineEvent::DocumentWritten {
            id,
            result: Ok(path),
        }) => {
            assert_eq!(id, navi_core::DocumentId(3));
            assert!(path.starts_with(temp.path().join("docs")));
            let html = std::fs::read_to_string(path).unwrap();
            assert!(html.contains("Rental Application"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
