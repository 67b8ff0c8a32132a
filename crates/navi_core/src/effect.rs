use crate::{
    ApplicationForm, AudioOption, DelayKind, DelayTicket, DocumentId, MessageId, TranscriptionId,
};

/// Work the runner performs on behalf of [`crate::update`]. Completion comes
/// back as a [`crate::Msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read a bot line aloud. Fire-and-forget; failure is reported as
    /// `Msg::CapabilityMissing` with `Capability::Speech { message_id }`.
    Speak {
        message_id: MessageId,
        text: String,
        option: AudioOption,
    },
    /// Answer with `Msg::DelayElapsed { ticket }` after the delay for `kind`.
    ScheduleDelay { ticket: DelayTicket, kind: DelayKind },
    CancelDelay { ticket: DelayTicket },
    /// Answer with `Msg::TranscriptionFinished { id }`.
    Transcribe { id: TranscriptionId, clip: AudioClip },
    /// Answer with `Msg::DocumentSaved` or `Msg::DocumentFailed` carrying `id`.
    RenderApplication { id: DocumentId, form: ApplicationForm },
}

/// A finished recording handed over by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Where the recording can be played back from.
    pub source: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
