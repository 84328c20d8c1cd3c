//! Conversational trip planning. A session collects a destination and
//! a day count through free-text messages, then triggers exactly one
//! itinerary generation and resets for the next trip.

pub mod extract;
pub mod session;

pub use extract::extract_trip_info;
pub use session::{SessionState, SessionStore};

use crate::agents::ItineraryGenerator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// The closed set of message-content kinds, matched exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChatContent {
    Text { text: String },
    StartSession,
    EndSession,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub msg_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub content: Vec<ChatContent>,
}

impl ChatMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            msg_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            content: vec![ChatContent::Text { text: text.into() }],
        }
    }

    pub fn text_ending_session(text: impl Into<String>) -> Self {
        Self {
            msg_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            content: vec![
                ChatContent::Text { text: text.into() },
                ChatContent::EndSession,
            ],
        }
    }

    pub fn session_start() -> Self {
        Self {
            msg_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            content: vec![ChatContent::StartSession],
        }
    }

    /// Concatenated text content of the message, if any
    pub fn text_content(&self) -> Option<String> {
        let mut out = String::new();
        for item in &self.content {
            if let ChatContent::Text { text } = item {
                out.push_str(text);
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    pub fn starts_session(&self) -> bool {
        self.content
            .iter()
            .any(|c| matches!(c, ChatContent::StartSession))
    }
}

const GREETING: &str = "Hey! I'm your travel planner.\n\n\
    I create detailed itineraries for destinations worldwide - from El Salvador \
    to Tokyo, Paris to Patagonia.\n\nWhere do you want to go?";

/// Number of recent conversation lines fed to the generator as context
const CONTEXT_LINES: usize = 5;

/// Chat-style frontend over the itinerary generator. Session state is
/// an injected store rather than process-global, so tests run without
/// shared state and callers control locking granularity.
pub struct ChatPlanner {
    sessions: SessionStore,
    generator: Arc<dyn ItineraryGenerator>,
}

impl ChatPlanner {
    pub fn new(sessions: SessionStore, generator: Arc<dyn ItineraryGenerator>) -> Self {
        Self {
            sessions,
            generator,
        }
    }

    /// Handle one incoming message and return the replies to send, in
    /// order. The DashMap entry guard serializes access per sender.
    pub async fn handle_message(&self, sender: &str, msg: &ChatMessage) -> Vec<ChatMessage> {
        if msg.starts_session() {
            return vec![ChatMessage::text(GREETING)];
        }

        let Some(text) = msg.text_content() else {
            return Vec::new();
        };

        // Update state under the entry lock, then decide what to do.
        let (destination, days) = {
            let mut state = self.sessions.entry(sender);
            let info = extract_trip_info(&text);
            if let Some(dest) = info.destination {
                state.destination = Some(dest.to_string());
            }
            if let Some(days) = info.days {
                state.days = Some(days);
            }
            state.push_history("user", &text);
            (state.destination.clone(), state.days)
        };

        let Some(destination) = destination else {
            return vec![self.reply(sender, "Where would you like to go? Any country or city works!")];
        };
        let Some(days) = days else {
            return vec![self.reply(
                sender,
                &format!("Perfect! {destination}\n\nHow many days will you be there?"),
            )];
        };

        info!(target: "chat", sender = %sender, destination = %destination, days, "Generating itinerary");

        let progress = ChatMessage::text(format!(
            "Creating your detailed {days}-day {destination} itinerary...\n\
             This takes about 20 seconds."
        ));

        let context = self.sessions.recent_history(sender, CONTEXT_LINES);
        let result = self.generator.generate(&destination, days, &context).await;

        // Destination and days reset for the next trip either way;
        // history is kept.
        {
            let mut state = self.sessions.entry(sender);
            state.destination = None;
            state.days = None;
        }

        match result {
            Ok(mut itinerary) => {
                itinerary.push_str(
                    "\n\nWant to adjust anything? Just let me know! I can modify \
                     destinations, add more details, or change the focus.",
                );
                self.sessions.entry(sender).push_history("assistant", &itinerary);
                vec![progress, ChatMessage::text_ending_session(itinerary)]
            }
            Err(e) => {
                warn!(target: "chat", sender = %sender, error = %e, "Itinerary generation failed");
                let reply = self.reply(
                    sender,
                    "Oops! I had trouble creating your itinerary. Let's try again - \
                     where would you like to go?",
                );
                vec![progress, reply]
            }
        }
    }

    fn reply(&self, sender: &str, text: &str) -> ChatMessage {
        self.sessions.entry(sender).push_history("assistant", text);
        ChatMessage::text(text)
    }
}
