use chrono::{DateTime, TimeZone, Utc};
use navi_core::{
    prompts, update, AppState, AudioClip, AudioOption, Capability, ConversationState, DelayKind,
    DelayTicket, DocumentId, Effect, Language, MessageKind, MicrophoneIssue, Msg, ServiceCard,
    Settings, TranscriptionId,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    navi_logging::initialize_for_tests();
}

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 11, minute, 0).unwrap()
}

fn send(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::TextSubmitted {
            text: text.to_string(),
            at: at(1),
        },
    )
}

fn processing_ticket(effects: &[Effect]) -> Option<DelayTicket> {
    effects.iter().find_map(|effect| match effect {
        Effect::ScheduleDelay {
            ticket,
            kind: DelayKind::Processing,
        } => Some(*ticket),
        _ => None,
    })
}

/// Introduced user whose job branch is complete, searching.
fn searching() -> (AppState, DelayTicket) {
    let (state, _) = send(AppState::new(at(0)), "Chen Wei");
    let (state, _) = send(state, "China");
    let (state, _) = send(state, "2021. Green card");
    let (state, _) = update(
        state,
        Msg::ServicePicked {
            card: ServiceCard::JobSearch,
            at: at(2),
        },
    );
    let (state, _) = send(state, "Accountant");
    let (state, _) = send(state, "CPA");
    let (state, _) = send(state, "Boston");
    let (state, _) = send(state, "$90k");
    let (state, effects) = send(state, "nothing else");
    let ticket = processing_ticket(&effects).expect("search delay");
    (state, ticket)
}

fn clip() -> AudioClip {
    AudioClip {
        source: "clip-1.webm".into(),
        mime_type: "audio/webm".into(),
        bytes: vec![1, 2, 3],
    }
}

#[test]
fn input_while_searching_is_ignored() {
    init_logging();
    let (state, _) = searching();
    let before = state.messages().len();

    let (state, effects) = send(state, "are you there?");
    assert!(effects.is_empty());
    assert_eq!(state.messages().len(), before);

    let (state, effects) = update(
        state,
        Msg::ServicePicked {
            card: ServiceCard::HousingSearch,
            at: at(3),
        },
    );
    assert!(effects.is_empty());
    assert!(state.is_loading());
}

#[test]
fn stale_delay_is_ignored() {
    init_logging();
    let (state, ticket) = searching();
    let stale = DelayTicket(ticket.0 + 100);

    let (state, effects) = update(state, Msg::DelayElapsed { ticket: stale, at: at(4) });
    assert!(effects.is_empty());
    assert!(state.is_loading());
    assert_eq!(state.conversation(), ConversationState::JobSearch);
}

#[test]
fn navigating_away_cancels_the_search() {
    init_logging();
    let (state, ticket) = searching();

    let (state, effects) = update(state, Msg::NavigatedAway);
    assert_eq!(effects, vec![Effect::CancelDelay { ticket }]);
    assert!(!state.is_loading());
    assert_eq!(state.conversation(), ConversationState::ServiceSelection);

    let (state, effects) = update(state, Msg::DelayElapsed { ticket, at: at(5) });
    assert!(effects.is_empty());
    assert_eq!(state.conversation(), ConversationState::ServiceSelection);
}

#[test]
fn sign_out_resets_session_but_keeps_settings() {
    init_logging();
    let (state, ticket) = searching();
    let (state, _) = update(state, Msg::LanguageChanged(Language::Polish));

    let (state, effects) = update(state, Msg::SignedOut { at: at(6) });
    assert_eq!(effects, vec![Effect::CancelDelay { ticket }]);
    assert_eq!(state.conversation(), ConversationState::Initial);
    assert!(state.profile().is_empty());
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages().all()[0].content, prompts::GREETING);
    assert_eq!(state.settings().language, Language::Polish);
}

#[test]
fn account_deletion_restores_starting_settings() {
    init_logging();
    let configured = Settings {
        language: Language::French,
        audio: AudioOption::Local,
    };
    let (state, _) = update(
        AppState::with_settings(configured, at(0)),
        Msg::AudioOptionChanged(AudioOption::Off),
    );
    let (state, _) = update(state, Msg::LanguageChanged(Language::Hindi));
    let (state, effects) = update(state, Msg::AccountDeleted { at: at(1) });

    assert!(effects.is_empty());
    assert_eq!(state.settings(), configured);
}

#[test]
fn late_results_from_before_sign_out_are_dropped() {
    init_logging();
    let (state, _) = send(AppState::new(at(0)), "Maria Lopez");
    let spoken = state.messages().last().unwrap().id;
    let (state, _) = update(state, Msg::SignedOut { at: at(2) });

    let (state, effects) = update(
        state,
        Msg::DocumentSaved {
            id: DocumentId(1),
            file_name: "old_user.html".into(),
            at: at(3),
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        Msg::DocumentFailed {
            id: DocumentId(1),
            at: at(3),
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        Msg::CapabilityMissing {
            capability: Capability::Speech {
                message_id: spoken,
            },
            at: at(4),
        },
    );
    assert!(effects.is_empty());

    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages().all()[0].content, prompts::GREETING);
    assert!(state.view().speech_available);
}

#[test]
fn file_upload_only_acknowledges() {
    init_logging();
    let (state, _) = send(AppState::new(at(0)), "Olena");
    let (state, effects) = update(
        state,
        Msg::FileUploaded {
            file_name: "passport.pdf".into(),
            at: at(2),
        },
    );

    assert_eq!(state.conversation(), ConversationState::PersonalInfo);
    assert_eq!(state.profile().country, None);
    assert!(processing_ticket(&effects).is_none());
    let log = state.messages().all();
    assert_eq!(log[log.len() - 2].content, prompts::uploaded("passport.pdf"));
    assert_eq!(log[log.len() - 1].content, prompts::DOCUMENT_PROCESSED);
}

#[test]
fn recording_is_transcribed_into_an_audio_message() {
    init_logging();
    let (state, effects) = update(
        AppState::new(at(0)),
        Msg::AudioRecorded {
            clip: clip(),
            at: at(3),
        },
    );
    let id = match effects.as_slice() {
        [Effect::Transcribe { id, clip: sent }] => {
            assert_eq!(sent, &clip());
            *id
        }
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, _) = update(
        state,
        Msg::TranscriptionFinished {
            id,
            transcript: Some("  I need help with rent ".into()),
            at: at(4),
        },
    );
    let message = state.messages().last().unwrap();
    assert_eq!(message.kind, MessageKind::Audio);
    assert_eq!(message.audio_url.as_deref(), Some("clip-1.webm"));
    assert_eq!(message.transcription.as_deref(), Some("I need help with rent"));
    assert_eq!(message.timestamp, at(3));
    // Audio never drives the conversation.
    assert_eq!(state.conversation(), ConversationState::Initial);
}

#[test]
fn failed_transcription_uses_placeholder() {
    init_logging();
    let (state, effects) = update(
        AppState::new(at(0)),
        Msg::AudioRecorded {
            clip: clip(),
            at: at(3),
        },
    );
    let Some(Effect::Transcribe { id, .. }) = effects.first() else {
        panic!("no transcription requested");
    };

    let (state, _) = update(
        state,
        Msg::TranscriptionFinished {
            id: *id,
            transcript: None,
            at: at(4),
        },
    );
    let message = state.messages().last().unwrap();
    assert_eq!(
        message.transcription.as_deref(),
        Some(prompts::TRANSCRIPTION_PLACEHOLDER)
    );
    let message_id = message.id;

    let (state, _) = update(state, Msg::TranscriptToggled(message_id));
    assert_eq!(state.view().expanded_transcript, Some(message_id));
}

#[test]
fn unknown_transcription_is_dropped() {
    init_logging();
    let (state, _) = update(
        AppState::new(at(0)),
        Msg::TranscriptionFinished {
            id: TranscriptionId(42),
            transcript: Some("hello".into()),
            at: at(1),
        },
    );
    assert_eq!(state.messages().len(), 1);
}

#[test]
fn audio_off_means_no_speech() {
    init_logging();
    let settings = Settings {
        audio: AudioOption::Off,
        ..Settings::default()
    };
    let (_, effects) = send(AppState::with_settings(settings, at(0)), "Rosa");
    assert!(effects.is_empty());
}

#[test]
fn speech_failure_disables_speech_once() {
    init_logging();
    let state = AppState::new(at(0));
    let greeting = state.messages().last().unwrap().id;
    let (state, _) = update(
        state,
        Msg::CapabilityMissing {
            capability: Capability::Speech {
                message_id: greeting,
            },
            at: at(1),
        },
    );
    assert_eq!(
        state.messages().last().unwrap().content,
        prompts::SPEECH_UNAVAILABLE
    );
    assert!(!state.view().speech_available);

    let before = state.messages().len();
    let (state, _) = update(
        state,
        Msg::CapabilityMissing {
            capability: Capability::Speech {
                message_id: greeting,
            },
            at: at(2),
        },
    );
    assert_eq!(state.messages().len(), before);

    let (_, effects) = send(state, "Rosa");
    assert!(effects.is_empty());
}

#[test]
fn microphone_problems_are_explained() {
    init_logging();
    let (state, _) = update(
        AppState::new(at(0)),
        Msg::CapabilityMissing {
            capability: Capability::Microphone(MicrophoneIssue::PermissionDenied),
            at: at(1),
        },
    );
    assert_eq!(state.messages().last().unwrap().content, prompts::MIC_DENIED);
}

#[test]
fn noop_changes_nothing() {
    init_logging();
    let mut state = AppState::new(at(0));
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::NoOp);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}
