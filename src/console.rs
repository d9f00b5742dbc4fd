use async_trait::async_trait;
use colored::*;
use events::{EventHandler, StreamEvent};

/// Prints a status line for each stream event.
pub struct ConsolePrinter;

#[async_trait]
impl EventHandler for ConsolePrinter {
    async fn handle(&self, event: &StreamEvent) {
        match event {
            StreamEvent::Position { sourcepos } => {
                println!("{} position update: {}", "→".blue(), sourcepos.bold());
            }
            StreamEvent::FileChanged { html } => {
                println!("{} content replaced ({} bytes)", "✓".green(), html.len());
            }
        }
    }
}
