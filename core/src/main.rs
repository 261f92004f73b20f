use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use todo_sync::presentation::{self, Intent, HELP};
use todo_sync::{ClientConfig, SyncController, SyncError};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::default();
    info!(base_url = %config.base_url, "starting todo client");
    let controller = Arc::new(SyncController::connect(&config)?);

    // Re-render whenever the store settles after a change.
    let mut updates = controller.store().subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let view = updates.borrow_and_update().clone();
            if !view.loading {
                println!("{}", presentation::render(&view));
            }
        }
    });

    println!("{HELP}");
    if let Err(e) = controller.load_all().await {
        debug!(error = %e, "initial load failed");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(intent) = Intent::parse(&line) else {
            println!("{HELP}");
            continue;
        };
        if intent == Intent::Quit {
            break;
        }
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            match presentation::dispatch(&*controller, intent).await {
                Ok(()) => {}
                Err(SyncError::InvalidTitle(e)) => println!("{e}"),
                Err(e) => debug!(error = %e, "intent failed"),
            }
        });
    }

    controller.store().teardown();
    renderer.abort();
    Ok(())
}
