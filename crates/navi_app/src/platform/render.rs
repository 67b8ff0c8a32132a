//! Turns view-model snapshots into terminal lines, printing only what is new
//! since the previous snapshot.

use chrono::Local;
use navi_core::{AppViewModel, Listing, ListingKey, Message, MessageId, MessageKind};

#[derive(Debug, Default)]
pub struct Renderer {
    last_message: Option<MessageId>,
    cards_shown: bool,
    loading_shown: bool,
    listings_shown: Vec<ListingKey>,
    saved_shown: Vec<ListingKey>,
    application_shown: bool,
    expanded: Option<MessageId>,
}

impl Renderer {
    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        let fresh: Vec<&Message> = view
            .messages
            .iter()
            .filter(|message| Some(message.id) > self.last_message)
            .collect();
        let restarted = self.last_message.is_some() && view.messages.len() == 1 && !fresh.is_empty();
        if restarted {
            lines.push("--- new session ---".to_string());
        }
        for message in &fresh {
            lines.push(format_message(message));
        }
        if let Some(last) = view.messages.last() {
            self.last_message = Some(last.id);
        }

        if let Some(id) = view.expanded_transcript.filter(|id| Some(*id) != self.expanded) {
            if let Some(text) = view
                .messages
                .iter()
                .find(|message| message.id == id)
                .and_then(|message| message.transcription.as_deref())
            {
                lines.push(format!("  Transcript #{}: {text}", id.0));
            }
        }
        self.expanded = view.expanded_transcript;

        let cards_visible = !view.service_cards.is_empty();
        if cards_visible && !self.cards_shown {
            for (index, card) in view.service_cards.iter().enumerate() {
                lines.push(format!("  [{}] {}", index + 1, card.label()));
            }
        }
        self.cards_shown = cards_visible;

        match &view.loading {
            Some(loading) if !self.loading_shown => {
                lines.extend(loading.steps.iter().map(|step| format!("  ... {step}")));
            }
            _ => {}
        }
        self.loading_shown = view.loading.is_some();

        let keys: Vec<ListingKey> = view.listings.iter().map(Listing::key).collect();
        if !keys.is_empty() && (keys != self.listings_shown || view.saved != self.saved_shown) {
            for (index, listing) in view.listings.iter().enumerate() {
                let saved = view.saved.contains(&listing.key());
                lines.extend(format_listing(index + 1, listing, saved));
            }
        }
        self.listings_shown = keys;
        self.saved_shown = view.saved.clone();

        if view.autofilling && !self.application_shown && view.application.is_none() {
            lines.push("  ... filling in your application".to_string());
        }
        match &view.application {
            Some(form) if !self.application_shown => {
                lines.push(format!(
                    "  Application for {} is ready. Type /download to save it.",
                    form.listing.title()
                ));
            }
            _ => {}
        }
        self.application_shown = view.application.is_some();

        lines
    }
}

fn format_message(message: &Message) -> String {
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    match message.kind {
        MessageKind::Bot => format!("[{time}] Navi: {}", message.content),
        MessageKind::User => format!("[{time}] You: {}", message.content),
        MessageKind::Audio => format!(
            "[{time}] You: ({} #{}, /transcript {} to read)",
            message.content, message.id.0, message.id.0
        ),
    }
}

fn format_listing(position: usize, listing: &Listing, saved: bool) -> Vec<String> {
    let marker = if saved { " (saved)" } else { "" };
    match listing {
        Listing::Job(job) => vec![
            format!(
                "  [{position}] {} at {}, {}{marker}",
                job.title, job.company, job.location
            ),
            format!("      {} | {}", job.salary, job.employment_type),
            format!("      {}", job.description),
        ],
        Listing::Housing(home) => vec![
            format!("  [{position}] {}, {}{marker}", home.name, home.location),
            format!(
                "      ${}/month | {} bd / {} ba | {}",
                home.rent_per_month,
                home.bedrooms,
                home.bathrooms,
                home.features.join(", ")
            ),
            format!("      {}", home.description),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use navi_core::{update, AppState, Msg, ServiceCard};

    fn at() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn send(state: AppState, text: &str) -> AppState {
        update(
            state,
            Msg::TextSubmitted {
                text: text.into(),
                at: at(),
            },
        )
        .0
    }

    #[test]
    fn only_new_messages_are_printed() {
        let mut renderer = Renderer::default();
        let state = AppState::new(at());

        let first = renderer.render(&state.view());
        assert_eq!(first.len(), 1);
        assert!(first[0].contains("Navi: Hello, I'm Navi"));

        let state = send(state, "Maria");
        let second = renderer.render(&state.view());
        assert_eq!(second.len(), 2);
        assert!(second[0].ends_with("You: Maria"));
        assert!(second[1].contains("Hello Maria"));

        assert!(renderer.render(&state.view()).is_empty());
    }

    #[test]
    fn cards_follow_the_service_question() {
        let mut renderer = Renderer::default();
        let state = send(send(send(AppState::new(at()), "Maria"), "Mexico"), "2023. H1B");

        let lines = renderer.render(&state.view());
        assert!(lines.contains(&"  [1] Job Search".to_string()));
        assert!(lines.contains(&"  [7] Forms Submission".to_string()));

        let (state, _) = update(
            state,
            Msg::ServicePicked {
                card: ServiceCard::ChildCare,
                at: at(),
            },
        );
        let lines = renderer.render(&state.view());
        assert!(!lines.iter().any(|line| line.starts_with("  [1]")));
    }

    #[test]
    fn reset_is_marked() {
        let mut renderer = Renderer::default();
        let state = send(AppState::new(at()), "Maria");
        renderer.render(&state.view());

        let (state, _) = update(state, Msg::SignedOut { at: at() });
        let lines = renderer.render(&state.view());
        assert_eq!(lines[0], "--- new session ---");
        assert!(lines[1].contains("What is your name?"));
    }
}
