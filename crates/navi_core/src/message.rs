use chrono::{DateTime, Utc};

use crate::prompts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Bot,
    User,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub audio_url: Option<String>,
    pub transcription: Option<String>,
}

/// Append-only chat transcript.
///
/// Ids keep increasing across [`MessageLog::reset`] so a renderer keyed by id
/// never confuses a message from before a sign-out with one after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageLog {
    /// A log holding only the canonical greeting.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        let mut log = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        log.push_greeting(started_at);
        log
    }

    pub fn append(
        &mut self,
        kind: MessageKind,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> MessageId {
        let id = self.allocate_id();
        self.push(Message {
            id,
            kind,
            content: content.into(),
            timestamp,
            audio_url: None,
            transcription: None,
        })
    }

    pub fn append_audio(
        &mut self,
        audio_url: String,
        transcription: String,
        timestamp: DateTime<Utc>,
    ) -> MessageId {
        let id = self.allocate_id();
        self.push(Message {
            id,
            kind: MessageKind::Audio,
            content: prompts::AUDIO_MESSAGE_LABEL.to_string(),
            timestamp,
            audio_url: Some(audio_url),
            transcription: Some(transcription),
        })
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn reset(&mut self, at: DateTime<Utc>) {
        self.messages.clear();
        self.push_greeting(at);
    }

    fn push_greeting(&mut self, at: DateTime<Utc>) {
        self.append(MessageKind::Bot, prompts::GREETING, at);
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, message: Message) -> MessageId {
        let id = message.id;
        self.messages.push(message);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn new_log_holds_greeting() {
        let log = MessageLog::new(at());
        assert_eq!(log.len(), 1);
        assert_eq!(log.all()[0].kind, MessageKind::Bot);
        assert_eq!(log.all()[0].content, prompts::GREETING);
    }

    #[test]
    fn ids_stay_unique_across_reset() {
        let mut log = MessageLog::new(at());
        let first = log.append(MessageKind::User, "hi", at());
        log.reset(at());
        let greeting = log.all()[0].id;

        assert_eq!(log.len(), 1);
        assert!(greeting > first);
        assert!(log.get(first).is_none());
    }
}
