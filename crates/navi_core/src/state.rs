use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationForm;
use crate::catalog::{Listing, ListingKey};
use crate::message::{MessageId, MessageLog};
use crate::profile::UserProfile;
use crate::view_model::{AppViewModel, LoadingView};
use crate::{flow, ServiceCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Initial,
    PersonalInfo,
    ServiceSelection,
    JobSearch,
    HousingSearch,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Service {
    Job,
    Housing,
}

impl Service {
    /// Conversation state that collects this service's questions.
    pub fn branch_state(self) -> ConversationState {
        match self {
            Service::Job => ConversationState::JobSearch,
            Service::Housing => ConversationState::HousingSearch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioOption {
    /// Speak with the platform voice.
    #[default]
    Browser,
    /// Prefer pre-recorded clips, falling back to the platform voice.
    Local,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "uk")]
    Ukrainian,
    #[serde(rename = "pl")]
    Polish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Spanish,
        Language::Ukrainian,
        Language::Polish,
        Language::French,
        Language::Hindi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::Ukrainian => "uk",
            Language::Polish => "pl",
            Language::French => "fr",
            Language::Hindi => "hi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::Ukrainian => "Українська",
            Language::Polish => "Polski",
            Language::French => "Français",
            Language::Hindi => "हिन्दी",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Device preferences. They survive a sign-out; an account deletion restores
/// the ones the session started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub language: Language,
    pub audio: AudioOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DelayTicket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TranscriptionId(pub u64);

/// Correlates a document write with the session that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(pub u64);

/// What a scheduled delay is standing in for. The runner maps each kind to a
/// configured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayKind {
    Processing,
    Autofill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingWork {
    Results(Service),
    Autofill(ListingKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pending {
    pub ticket: DelayTicket,
    pub work: PendingWork,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingAudio {
    pub audio_url: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowUp {
    #[default]
    NotOffered,
    Offered,
    /// The user declined further help; the conversation is over until reset.
    Declined,
}

/// The whole session: conversation progress, profile, transcript and the
/// bookkeeping needed to correlate asynchronous work.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    conversation: ConversationState,
    service: Option<Service>,
    profile: UserProfile,
    log: MessageLog,
    settings: Settings,
    initial_settings: Settings,
    speech_available: bool,
    pending: Option<Pending>,
    next_ticket: u64,
    next_transcription: u64,
    transcriptions: BTreeMap<TranscriptionId, PendingAudio>,
    next_document: u64,
    documents: BTreeSet<DocumentId>,
    results: Vec<Listing>,
    saved: Vec<ListingKey>,
    follow_up: FollowUp,
    application: Option<ApplicationForm>,
    expanded_transcript: Option<MessageId>,
    turn: u64,
    dirty: bool,
}

impl AppState {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self::with_settings(Settings::default(), started_at)
    }

    pub fn with_settings(settings: Settings, started_at: DateTime<Utc>) -> Self {
        Self {
            conversation: ConversationState::Initial,
            service: None,
            profile: UserProfile::default(),
            log: MessageLog::new(started_at),
            settings,
            initial_settings: settings,
            speech_available: true,
            pending: None,
            next_ticket: 1,
            next_transcription: 1,
            transcriptions: BTreeMap::new(),
            next_document: 1,
            documents: BTreeSet::new(),
            results: Vec::new(),
            saved: Vec::new(),
            follow_up: FollowUp::NotOffered,
            application: None,
            expanded_transcript: None,
            turn: 0,
            dirty: true,
        }
    }

    pub fn conversation(&self) -> ConversationState {
        self.conversation
    }

    pub fn service(&self) -> Option<Service> {
        self.service
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn messages(&self) -> &MessageLog {
        &self.log
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.pending,
            Some(Pending {
                work: PendingWork::Results(_),
                ..
            })
        )
    }

    pub fn pending_ticket(&self) -> Option<DelayTicket> {
        self.pending.map(|pending| pending.ticket)
    }

    pub fn saved_listings(&self) -> &[ListingKey] {
        &self.saved
    }

    pub fn application(&self) -> Option<&ApplicationForm> {
        self.application.as_ref()
    }

    /// Number of user turns handled so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn view(&self) -> AppViewModel {
        let loading = match self.pending {
            Some(Pending {
                work: PendingWork::Results(service),
                ..
            }) => Some(LoadingView {
                service,
                steps: flow::branch(service).loading_steps,
            }),
            _ => None,
        };
        let service_cards = if self.conversation == ConversationState::ServiceSelection {
            ServiceCard::ALL.to_vec()
        } else {
            Vec::new()
        };

        AppViewModel {
            conversation: self.conversation,
            service: self.service,
            messages: self.log.all().to_vec(),
            expanded_transcript: self.expanded_transcript,
            service_cards,
            loading,
            listings: self.results.clone(),
            saved: self.saved.clone(),
            follow_up: self.follow_up,
            autofilling: matches!(
                self.pending,
                Some(Pending {
                    work: PendingWork::Autofill(_),
                    ..
                })
            ),
            application: self.application.clone(),
            profile: self.profile.clone(),
            settings: self.settings,
            speech_available: self.speech_available,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_turn(&mut self) {
        self.turn += 1;
    }

    pub(crate) fn set_conversation(&mut self, next: ConversationState) {
        if self.conversation != next {
            navi_logging::navi_debug!("conversation {:?} -> {:?}", self.conversation, next);
            self.conversation = next;
        }
        self.mark_dirty();
    }

    pub(crate) fn set_service(&mut self, service: Option<Service>) {
        self.service = service;
        self.mark_dirty();
    }

    pub(crate) fn merge_profile(&mut self, partial: UserProfile) {
        self.profile.merge(partial);
        self.mark_dirty();
    }

    pub(crate) fn log_mut(&mut self) -> &mut MessageLog {
        self.mark_dirty();
        &mut self.log
    }

    pub(crate) fn settings_mut(&mut self) -> &mut Settings {
        self.mark_dirty();
        &mut self.settings
    }

    pub(crate) fn speech_enabled(&self) -> bool {
        self.speech_available && self.settings.audio != AudioOption::Off
    }

    pub(crate) fn speech_available(&self) -> bool {
        self.speech_available
    }

    pub(crate) fn disable_speech(&mut self) {
        self.speech_available = false;
        self.mark_dirty();
    }

    pub(crate) fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Registers the single pending delay. Any previous one is replaced, and
    /// its ticket returned so the caller can cancel it.
    pub(crate) fn start_pending(&mut self, work: PendingWork) -> (DelayTicket, Option<DelayTicket>) {
        let ticket = DelayTicket(self.next_ticket);
        self.next_ticket += 1;
        let superseded = self.pending.replace(Pending { ticket, work });
        self.mark_dirty();
        (ticket, superseded.map(|pending| pending.ticket))
    }

    pub(crate) fn take_pending(&mut self) -> Option<Pending> {
        let pending = self.pending.take();
        if pending.is_some() {
            self.mark_dirty();
        }
        pending
    }

    pub(crate) fn register_transcription(
        &mut self,
        audio_url: String,
        recorded_at: DateTime<Utc>,
    ) -> TranscriptionId {
        let id = TranscriptionId(self.next_transcription);
        self.next_transcription += 1;
        self.transcriptions.insert(
            id,
            PendingAudio {
                audio_url,
                recorded_at,
            },
        );
        id
    }

    pub(crate) fn take_transcription(&mut self, id: TranscriptionId) -> Option<PendingAudio> {
        self.transcriptions.remove(&id)
    }

    pub(crate) fn register_document(&mut self) -> DocumentId {
        let id = DocumentId(self.next_document);
        self.next_document += 1;
        self.documents.insert(id);
        id
    }

    /// True when `id` was requested in this session and not yet answered.
    pub(crate) fn take_document(&mut self, id: DocumentId) -> bool {
        self.documents.remove(&id)
    }

    pub(crate) fn set_results(&mut self, results: Vec<Listing>) {
        self.results = results;
        self.mark_dirty();
    }

    pub(crate) fn save_listing(&mut self, key: ListingKey) {
        if !self.saved.contains(&key) {
            self.saved.push(key);
        }
        self.mark_dirty();
    }

    pub(crate) fn follow_up(&self) -> FollowUp {
        self.follow_up
    }

    pub(crate) fn set_follow_up(&mut self, follow_up: FollowUp) {
        self.follow_up = follow_up;
        self.mark_dirty();
    }

    pub(crate) fn set_application(&mut self, form: Option<ApplicationForm>) {
        self.application = form;
        self.mark_dirty();
    }

    pub(crate) fn toggle_transcript(&mut self, id: MessageId) {
        self.expanded_transcript = if self.expanded_transcript == Some(id) {
            None
        } else {
            Some(id)
        };
        self.mark_dirty();
    }

    /// Clears everything tied to the account. Returns the ticket of a delay
    /// that was still pending so it can be cancelled.
    pub(crate) fn reset_session(&mut self, keep_settings: bool, at: DateTime<Utc>) -> Option<DelayTicket> {
        let cancelled = self.pending.take().map(|pending| pending.ticket);
        self.conversation = ConversationState::Initial;
        self.service = None;
        self.profile = UserProfile::default();
        self.log.reset(at);
        if !keep_settings {
            self.settings = self.initial_settings;
            self.speech_available = true;
        }
        self.transcriptions.clear();
        self.documents.clear();
        self.results.clear();
        self.saved.clear();
        self.follow_up = FollowUp::NotOffered;
        self.application = None;
        self.expanded_transcript = None;
        self.mark_dirty();
        cancelled
    }
}
