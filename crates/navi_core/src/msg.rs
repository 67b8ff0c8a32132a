use chrono::{DateTime, Utc};

use crate::{
    AudioClip, AudioOption, DelayTicket, DocumentId, Language, ListingKey, MessageId, ServiceCard,
    TranscriptionId, UserProfile,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User sent a line of text.
    TextSubmitted { text: String, at: DateTime<Utc> },
    /// User attached a file and sent it without text.
    FileUploaded { file_name: String, at: DateTime<Utc> },
    /// User clicked a service card.
    ServicePicked { card: ServiceCard, at: DateTime<Utc> },
    /// User saved a listing from the results.
    ListingSaved { key: ListingKey, at: DateTime<Utc> },
    /// Explicit answer to the "any other services?" offer.
    FollowUpAnswered { accepted: bool, at: DateTime<Utc> },
    /// User asked to autofill an application for a listing.
    AutofillRequested { key: ListingKey, at: DateTime<Utc> },
    /// User asked to download the autofilled application.
    DownloadRequested { at: DateTime<Utc> },
    /// Runner wrote the application document.
    DocumentSaved {
        id: DocumentId,
        file_name: String,
        at: DateTime<Utc>,
    },
    /// Runner could not write the application document.
    DocumentFailed { id: DocumentId, at: DateTime<Utc> },
    /// A scheduled delay ran to completion.
    DelayElapsed { ticket: DelayTicket, at: DateTime<Utc> },
    /// Front end finished a recording.
    AudioRecorded { clip: AudioClip, at: DateTime<Utc> },
    /// Transcription came back; `None` means it failed.
    TranscriptionFinished {
        id: TranscriptionId,
        transcript: Option<String>,
        at: DateTime<Utc>,
    },
    /// A device capability turned out to be missing.
    CapabilityMissing {
        capability: Capability,
        at: DateTime<Utc>,
    },
    /// External partial profile update, e.g. from an imported document.
    ProfileUpdated(UserProfile),
    LanguageChanged(Language),
    AudioOptionChanged(AudioOption),
    /// Expand or collapse the transcript of an audio message.
    TranscriptToggled(MessageId),
    /// User left the chat screen.
    NavigatedAway,
    SignedOut { at: DateTime<Utc> },
    AccountDeleted { at: DateTime<Utc> },
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Microphone(MicrophoneIssue),
    /// Speaking this message failed.
    Speech { message_id: MessageId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicrophoneIssue {
    Unsupported,
    PermissionDenied,
    NotFound,
    Other,
}
