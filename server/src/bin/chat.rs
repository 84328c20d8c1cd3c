//! Interactive terminal chat: the conversational trip-planning variant.
//! Type where you want to go and for how long; get an itinerary back.

use itinera_core::agents::ItineraryAgent;
use itinera_core::chat::{ChatContent, ChatMessage, ChatPlanner, SessionStore};
use itinera_core::LlmClient;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

const SENDER: &str = "terminal";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let backend = Arc::new(LlmClient::from_env()?);
    let generator = Arc::new(ItineraryAgent::new(backend));
    let planner = ChatPlanner::new(SessionStore::new(), generator);

    info!(target: "chat", "Chat planner started");

    print_replies(&planner.handle_message(SENDER, &ChatMessage::session_start()).await);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        let replies = planner.handle_message(SENDER, &ChatMessage::text(line)).await;
        print_replies(&replies);
    }

    Ok(())
}

fn print_replies(replies: &[ChatMessage]) {
    for reply in replies {
        for content in &reply.content {
            match content {
                ChatContent::Text { text } => println!("\n{text}\n"),
                ChatContent::StartSession => {}
                ChatContent::EndSession => println!("(session ended - ask for a new trip anytime)"),
            }
        }
    }
}
