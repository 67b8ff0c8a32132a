use chrono::{DateTime, Utc};
use navi_logging::{navi_debug, navi_info, navi_warn};

use crate::catalog::{find_listing, listings, Listing, ListingKey};
use crate::flow::{self, BranchStep};
use crate::profile::{first_name, is_affirmative, split_arrival_and_visa};
use crate::state::{PendingWork, Service};
use crate::{
    prompts, AppState, ApplicationForm, Capability, ConversationState, DelayKind, DelayTicket,
    Effect, FollowUp, MessageKind, MicrophoneIssue, Msg, ServiceCard, TranscriptionId,
    UserProfile,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    let fx = &mut effects;

    match msg {
        Msg::TextSubmitted { text, at } => submit_text(&mut state, fx, &text, at),
        Msg::FileUploaded { file_name, at } => {
            // Uploads are acknowledged only; they never advance the flow.
            state.begin_turn();
            state
                .log_mut()
                .append(MessageKind::User, prompts::uploaded(&file_name), at);
            say(&mut state, fx, prompts::DOCUMENT_PROCESSED, at);
        }
        Msg::ServicePicked { card, at } => pick_service(&mut state, fx, card, at),
        Msg::ListingSaved { key, at } => save_listing(&mut state, fx, key, at),
        Msg::FollowUpAnswered { accepted, at } => {
            if state.follow_up() == FollowUp::Offered {
                let reply = if accepted { "Yes" } else { "No" };
                state.log_mut().append(MessageKind::User, reply, at);
                answer_follow_up(&mut state, fx, accepted, at);
            }
        }
        Msg::AutofillRequested { key, at } => request_autofill(&mut state, fx, key, at),
        Msg::DownloadRequested { at } => request_download(&mut state, fx, at),
        Msg::DocumentSaved { id, file_name, at } => {
            if state.take_document(id) {
                say(&mut state, fx, prompts::document_saved(&file_name), at);
            } else {
                navi_debug!("dropping document {:?} from a previous session", id);
            }
        }
        Msg::DocumentFailed { id, at } => {
            if state.take_document(id) {
                say(&mut state, fx, prompts::DOCUMENT_FAILED, at);
            } else {
                navi_debug!("dropping document {:?} from a previous session", id);
            }
        }
        Msg::DelayElapsed { ticket, at } => finish_delay(&mut state, fx, ticket, at),
        Msg::AudioRecorded { clip, at } => {
            let id = state.register_transcription(clip.source.clone(), at);
            fx.push(Effect::Transcribe { id, clip });
        }
        Msg::TranscriptionFinished { id, transcript, .. } => {
            finish_transcription(&mut state, id, transcript);
        }
        Msg::CapabilityMissing { capability, at } => missing_capability(&mut state, fx, capability, at),
        Msg::ProfileUpdated(partial) => state.merge_profile(partial),
        Msg::LanguageChanged(language) => state.settings_mut().language = language,
        Msg::AudioOptionChanged(option) => state.settings_mut().audio = option,
        Msg::TranscriptToggled(id) => {
            let is_audio = state
                .messages()
                .get(id)
                .is_some_and(|message| message.kind == MessageKind::Audio);
            if is_audio {
                state.toggle_transcript(id);
            }
        }
        Msg::NavigatedAway => navigate_away(&mut state, fx),
        Msg::SignedOut { at } => reset(&mut state, fx, true, at),
        Msg::AccountDeleted { at } => reset(&mut state, fx, false, at),
        Msg::NoOp => {}
    }

    (state, effects)
}

/// Appends a bot line and, unless speech is off, asks for it to be spoken.
fn say(state: &mut AppState, fx: &mut Vec<Effect>, text: impl Into<String>, at: DateTime<Utc>) {
    let text = text.into();
    let message_id = state.log_mut().append(MessageKind::Bot, text.clone(), at);
    if state.speech_enabled() {
        fx.push(Effect::Speak {
            message_id,
            text,
            option: state.settings().audio,
        });
    }
}

fn submit_text(state: &mut AppState, fx: &mut Vec<Effect>, text: &str, at: DateTime<Utc>) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if state.is_loading() {
        navi_info!("search in progress; ignoring input");
        return;
    }
    if state.follow_up() == FollowUp::Declined {
        navi_debug!("conversation finished; ignoring input");
        return;
    }

    state.begin_turn();
    state.log_mut().append(MessageKind::User, text, at);

    match state.conversation() {
        ConversationState::Initial => {
            let Some(name) = first_name(text) else {
                return;
            };
            let name = name.to_string();
            state.merge_profile(UserProfile {
                name: Some(name.clone()),
                ..UserProfile::default()
            });
            say(state, fx, prompts::nice_to_meet(&name), at);
            state.set_conversation(ConversationState::PersonalInfo);
        }
        ConversationState::PersonalInfo => personal_info(state, fx, text, at),
        ConversationState::ServiceSelection => say(state, fx, prompts::PICK_A_SERVICE, at),
        ConversationState::JobSearch => branch_turn(state, fx, Service::Job, text, at),
        ConversationState::HousingSearch => branch_turn(state, fx, Service::Housing, text, at),
        ConversationState::Results => match state.follow_up() {
            FollowUp::Offered => answer_follow_up(state, fx, is_affirmative(text), at),
            FollowUp::NotOffered => say(state, fx, prompts::RESULTS_HINT, at),
            FollowUp::Declined => {}
        },
    }
}

fn personal_info(state: &mut AppState, fx: &mut Vec<Effect>, text: &str, at: DateTime<Utc>) {
    if state.profile().country.is_none() {
        state.merge_profile(UserProfile {
            country: Some(text.to_string()),
            ..UserProfile::default()
        });
        say(state, fx, prompts::ARRIVAL_AND_VISA_QUESTION, at);
        return;
    }

    if state.profile().visa_status.is_none() {
        let (arrival_date, visa_status) = split_arrival_and_visa(text);
        if arrival_date.is_none() {
            navi_debug!("visa answer has no arrival date; keeping whole answer as status");
        }
        state.merge_profile(UserProfile {
            arrival_date,
            visa_status: Some(visa_status),
            ..UserProfile::default()
        });
    }
    say(state, fx, prompts::SERVICE_QUESTION, at);
    state.set_conversation(ConversationState::ServiceSelection);
}

fn branch_turn(
    state: &mut AppState,
    fx: &mut Vec<Effect>,
    service: Service,
    text: &str,
    at: DateTime<Utc>,
) {
    let (update, step) = flow::branch(service).answer(state.profile(), text);
    if let Some(update) = update {
        state.merge_profile(update);
    }
    match step {
        BranchStep::Ask(prompt) => say(state, fx, prompt, at),
        BranchStep::StartSearch => start_search(state, fx, service, at),
    }
}

fn start_search(state: &mut AppState, fx: &mut Vec<Effect>, service: Service, at: DateTime<Utc>) {
    say(state, fx, flow::branch(service).loading_prompt, at);
    schedule(state, fx, PendingWork::Results(service), DelayKind::Processing);
    navi_info!("{service:?} search started");
}

fn schedule(state: &mut AppState, fx: &mut Vec<Effect>, work: PendingWork, kind: DelayKind) {
    let (ticket, superseded) = state.start_pending(work);
    if let Some(old) = superseded {
        fx.push(Effect::CancelDelay { ticket: old });
    }
    fx.push(Effect::ScheduleDelay { ticket, kind });
}

fn pick_service(state: &mut AppState, fx: &mut Vec<Effect>, card: ServiceCard, at: DateTime<Utc>) {
    if state.conversation() != ConversationState::ServiceSelection || state.pending().is_some() {
        navi_debug!("ignoring service card {:?} in {:?}", card, state.conversation());
        return;
    }

    state.begin_turn();
    state.log_mut().append(MessageKind::User, card.label(), at);

    let Some(service) = card.service() else {
        say(state, fx, prompts::service_unavailable(card.label()), at);
        return;
    };

    state.set_service(Some(service));
    state.set_results(Vec::new());
    state.set_application(None);
    state.set_follow_up(FollowUp::NotOffered);
    state.set_conversation(service.branch_state());

    match flow::branch(service).step_for(state.profile()) {
        BranchStep::Ask(prompt) => say(state, fx, prompt, at),
        BranchStep::StartSearch => start_search(state, fx, service, at),
    }
}

fn finish_delay(state: &mut AppState, fx: &mut Vec<Effect>, ticket: DelayTicket, at: DateTime<Utc>) {
    let Some(pending) = state.pending().filter(|pending| pending.ticket == ticket) else {
        navi_debug!("ignoring stale delay {:?}", ticket);
        return;
    };
    state.take_pending();

    match pending.work {
        PendingWork::Results(service) => {
            state.set_results(listings(service));
            state.set_follow_up(FollowUp::NotOffered);
            state.set_conversation(ConversationState::Results);
            let name = state.profile().display_name().to_string();
            let line = match service {
                Service::Job => prompts::job_results(&name),
                Service::Housing => prompts::housing_results(&name),
            };
            say(state, fx, line, at);
        }
        PendingWork::Autofill(key) => {
            let Some(listing) = find_listing(key) else {
                navi_warn!("autofill finished for unknown listing {:?}", key);
                return;
            };
            let form = ApplicationForm::autofill(state.profile(), listing, at.date_naive());
            state.set_application(Some(form));
            say(state, fx, prompts::autofill_completed(listing.title()), at);
        }
    }
}

/// A listing action is only valid against the results currently shown.
fn shown_listing(state: &AppState, key: ListingKey) -> Option<Listing> {
    if state.conversation() != ConversationState::Results
        || state.service() != Some(key.kind)
        || state.follow_up() == FollowUp::Declined
    {
        return None;
    }
    find_listing(key)
}

fn save_listing(state: &mut AppState, fx: &mut Vec<Effect>, key: ListingKey, at: DateTime<Utc>) {
    if shown_listing(state, key).is_none() {
        navi_debug!("ignoring save of {:?}", key);
        return;
    }

    state.save_listing(key);
    let confirmation = match key.kind {
        Service::Job => prompts::job_saved(state.profile().display_name()),
        Service::Housing => prompts::HOUSING_SAVED.to_string(),
    };
    say(state, fx, confirmation, at);

    if state.follow_up() == FollowUp::NotOffered {
        say(state, fx, prompts::FOLLOW_UP_OFFER, at);
        state.set_follow_up(FollowUp::Offered);
    }
}

fn answer_follow_up(state: &mut AppState, fx: &mut Vec<Effect>, accepted: bool, at: DateTime<Utc>) {
    // A running autofill belongs to the results being left behind.
    if let Some(pending) = state.take_pending() {
        fx.push(Effect::CancelDelay {
            ticket: pending.ticket,
        });
    }

    if !accepted {
        state.set_follow_up(FollowUp::Declined);
        say(state, fx, prompts::FAREWELL, at);
        return;
    }

    state.set_follow_up(FollowUp::NotOffered);
    state.set_service(None);
    state.set_results(Vec::new());
    state.set_application(None);
    state.set_conversation(ConversationState::ServiceSelection);
    say(state, fx, prompts::SERVICE_AGAIN_QUESTION, at);
}

fn request_autofill(state: &mut AppState, fx: &mut Vec<Effect>, key: ListingKey, at: DateTime<Utc>) {
    if shown_listing(state, key).is_none() || state.pending().is_some() {
        navi_debug!("ignoring autofill of {:?}", key);
        return;
    }

    state.set_application(None);
    say(state, fx, prompts::AUTOFILL_STARTED, at);
    schedule(state, fx, PendingWork::Autofill(key), DelayKind::Autofill);
}

fn request_download(state: &mut AppState, fx: &mut Vec<Effect>, at: DateTime<Utc>) {
    if state.follow_up() == FollowUp::Declined {
        navi_debug!("conversation finished; ignoring download");
        return;
    }
    let Some(form) = state.application().cloned() else {
        say(state, fx, prompts::AUTOFILL_REQUIRED, at);
        return;
    };
    let id = state.register_document();
    fx.push(Effect::RenderApplication { id, form });
}

fn finish_transcription(state: &mut AppState, id: TranscriptionId, transcript: Option<String>) {
    let Some(audio) = state.take_transcription(id) else {
        navi_debug!("dropping transcription {:?} from a previous session", id);
        return;
    };

    let text = transcript
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| {
            navi_warn!("transcription {:?} unavailable; using placeholder", id);
            prompts::TRANSCRIPTION_PLACEHOLDER.to_string()
        });
    state
        .log_mut()
        .append_audio(audio.audio_url, text, audio.recorded_at);
}

fn missing_capability(
    state: &mut AppState,
    fx: &mut Vec<Effect>,
    capability: Capability,
    at: DateTime<Utc>,
) {
    match capability {
        Capability::Microphone(issue) => {
            let line = match issue {
                MicrophoneIssue::Unsupported => prompts::MIC_UNSUPPORTED,
                MicrophoneIssue::PermissionDenied => prompts::MIC_DENIED,
                MicrophoneIssue::NotFound => prompts::MIC_NOT_FOUND,
                MicrophoneIssue::Other => prompts::MIC_FAILED,
            };
            say(state, fx, line, at);
        }
        Capability::Speech { message_id } => {
            if state.messages().get(message_id).is_none() {
                navi_debug!(
                    "dropping speech failure for message {:?} from a previous session",
                    message_id
                );
                return;
            }
            if state.speech_available() {
                state.disable_speech();
                say(state, fx, prompts::SPEECH_UNAVAILABLE, at);
            }
        }
    }
}

fn navigate_away(state: &mut AppState, fx: &mut Vec<Effect>) {
    let Some(pending) = state.take_pending() else {
        return;
    };
    fx.push(Effect::CancelDelay {
        ticket: pending.ticket,
    });
    if let PendingWork::Results(service) = pending.work {
        navi_info!("{service:?} search abandoned");
        state.set_service(None);
        state.set_conversation(ConversationState::ServiceSelection);
    }
}

fn reset(state: &mut AppState, fx: &mut Vec<Effect>, keep_settings: bool, at: DateTime<Utc>) {
    if let Some(ticket) = state.reset_session(keep_settings, at) {
        fx.push(Effect::CancelDelay { ticket });
    }
    navi_info!("session reset (settings kept: {keep_settings})");
}
