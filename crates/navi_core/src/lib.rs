//! Navi core: the conversation state machine, its catalogs and view model.
//! Nothing here performs I/O; timers, speech and transcription are requested
//! as [`Effect`]s and answered with [`Msg`]s.
mod application;
mod catalog;
mod effect;
mod flow;
mod message;
mod msg;
mod profile;
pub mod prompts;
mod state;
mod update;
mod view_model;

pub use application::{Applicant, ApplicationForm, Household};
pub use catalog::{find_listing, listings, HousingListing, JobListing, Listing, ListingKey};
pub use effect::{AudioClip, Effect};
pub use flow::{branch, Branch, BranchStep, Question, ServiceCard};
pub use message::{Message, MessageId, MessageKind, MessageLog};
pub use msg::{Capability, MicrophoneIssue, Msg};
pub use profile::{first_name, is_affirmative, split_arrival_and_visa, Child, ProfileField, UserProfile};
pub use state::{
    AppState, AudioOption, ConversationState, DelayKind, DelayTicket, DocumentId, FollowUp,
    Language, Service, Settings, TranscriptionId,
};
pub use update::update;
pub use view_model::{AppViewModel, LoadingView};
