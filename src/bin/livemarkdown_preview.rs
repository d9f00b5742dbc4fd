use anyhow::Result;
use colored::*;
use livemarkdown_preview::config::Config;
use livemarkdown_preview::console::ConsolePrinter;
use livemarkdown_preview::logging::Logger;
use log::info;
use reconciler::{HtmlSurface, Reconciler};
use std::sync::Arc;
use subscriber::Subscription;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new();
    Logger::init_logger(&config);

    // The live preview is a passive enhancement: a path outside the
    // document-view prefix is a normal condition, not an error.
    let Some(document_id) = subscriber::resolve_document_id(&config.path) else {
        info!("{} is not a document view, live preview disabled", config.path);
        return Ok(());
    };

    let reconciler = Arc::new(Reconciler::new(HtmlSurface::new()));
    let publisher = events::EventPublisher::new()
        .with_handler(reconciler.clone())
        .with_handler(Arc::new(ConsolePrinter));

    let mut subscription = Subscription::activate(&config.base_url, document_id, publisher)?;

    println!(
        "{} watching document {} (ctrl-c to stop)",
        "→".blue(),
        subscription.document_id().bold()
    );

    tokio::signal::ctrl_c().await?;
    subscription.deactivate();

    if let Some(sourcepos) = reconciler.position() {
        println!("{} last known position: {}", "✓".green(), sourcepos.bold());
    }
    let content_len = reconciler.inspect_surface(|surface| surface.content().len());
    println!("{} final content size: {} bytes", "✓".green(), content_len);

    Ok(())
}
