use crate::{
    ApplicationForm, ConversationState, FollowUp, Listing, ListingKey, Message, MessageId,
    Service, ServiceCard, Settings, UserProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingView {
    pub service: Service,
    pub steps: &'static [&'static str],
}

/// Snapshot handed to the renderer after each update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub conversation: ConversationState,
    pub service: Option<Service>,
    pub messages: Vec<Message>,
    pub expanded_transcript: Option<MessageId>,
    /// Non-empty only while a service can be picked.
    pub service_cards: Vec<ServiceCard>,
    pub loading: Option<LoadingView>,
    pub listings: Vec<Listing>,
    pub saved: Vec<ListingKey>,
    pub follow_up: FollowUp,
    pub autofilling: bool,
    pub application: Option<ApplicationForm>,
    pub profile: UserProfile,
    pub settings: Settings,
    pub speech_available: bool,
    pub dirty: bool,
}
