//! Headless driver: reads pointer and keyboard commands as JSON lines on
//! stdin and writes a session snapshot to stdout after every change. Logs
//! go to stderr.

mod protocol;

use anyhow::Context;
use finder_catalog::{AppCatalog, PlatformAppSource, SystemLauncher};
use finder_config::FinderConfig;
use finder_events::TracingEventBus;
use finder_recognition::{HttpRecognizer, NullRecognizer, RecognitionClientRef};
use finder_session::{SessionHandle, SessionSnapshot};
use protocol::{parse_line, Request};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FinderConfig::load().context("failed to load config")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting finder");
    match finder_config::config_path() {
        Some(path) => tracing::info!(path = %path.display(), exists = path.exists(), "config file"),
        None => tracing::info!("no config directory on this platform, using defaults"),
    }

    let source = PlatformAppSource::new(config.catalog.extra_dirs.clone());
    let catalog_config = config.catalog_config();
    let catalog = tokio::task::spawn_blocking(move || AppCatalog::load(&source, &catalog_config))
        .await?
        .context("failed to load application catalog")?;

    let recognizer: RecognitionClientRef = match config.recognizer_config() {
        Some(recognizer_config) => {
            tracing::info!(endpoint = %recognizer_config.endpoint, "using HTTP recognizer");
            Arc::new(HttpRecognizer::new(reqwest::Client::new(), recognizer_config))
        }
        None => {
            tracing::warn!("no recognition endpoint configured; drawings will not be recognized");
            Arc::new(NullRecognizer)
        }
    };

    let handle = SessionHandle::spawn(
        catalog,
        recognizer,
        Arc::new(SystemLauncher),
        Arc::new(TracingEventBus),
        config.session_config(),
    );

    let mut snapshots = handle.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            print_snapshot(&snapshots.borrow_and_update());
            if snapshots.changed().await.is_err() {
                break;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                None
            }
        };
        let Some(line) = line else {
            break;
        };

        let request = match parse_line(&line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed command");
                continue;
            }
        };

        match request {
            Request::Pointer(event) => handle.pointer(event).await?,
            Request::Typed { text } => handle.set_typed_text(text).await?,
            Request::Clear => handle.clear().await?,
            Request::Launch { identifier } => handle.launch(identifier).await?,
            Request::Snapshot => print_snapshot(&handle.snapshot().await?),
            Request::Quit => break,
        }
    }

    handle.shutdown().await?;
    drop(handle);
    let _ = printer.await;

    tracing::info!("finder stopped");
    Ok(())
}

fn print_snapshot(snapshot: &SessionSnapshot) {
    match serde_json::to_string(snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!(error = %e, "failed to serialize snapshot"),
    }
}
