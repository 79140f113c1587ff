// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use clap::{CommandFactory, Parser};
use common::config::CourseConfig;
use common::summary::TrackSummary;
use console::Console;
use course_session::CourseSession;
use dirs::data_local_dir;
use location::recording::read_recording;
use location::replay_source::ReplayLocationModule;
use module_core::{Event, EventBus, EventKind, Module};
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::{FileTrackStore, TrackStorage};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod console;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV recording with the columns latitude,longitude,heading,speed,timestamp
    #[arg(short = 'f', long)]
    fixes_file: Option<PathBuf>,
    /// JSON file with the course configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Folder of the stored track
    #[arg(short, long)]
    store_dir: Option<PathBuf>,
    /// Print the summary of the stored track and exit
    #[arg(long)]
    show_stored: bool,
}

fn load_config(path: Option<&Path>) -> Result<CourseConfig, ()> {
    let Some(path) = path else {
        return Ok(CourseConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| {
        error!("Failed to read config {}. Error: {}", path.to_string_lossy(), e);
    })?;
    CourseConfig::from_json(&json).map_err(|e| {
        error!("Failed to parse config {}. Error: {}", path.to_string_lossy(), e);
    })
}

fn get_storage_dir(cli: &Cli) -> Result<PathBuf, ()> {
    if let Some(dir) = &cli.store_dir {
        return Ok(dir.clone());
    }
    let mut storage_dir = data_local_dir().ok_or_else(|| {
        error!("Could not determine local data directory");
    })?;
    storage_dir.push("office-marathon");
    Ok(storage_dir)
}

async fn show_stored(store: &FileTrackStore) -> Result<(), ()> {
    let track = store.load().await.map_err(|e| {
        error!("Failed to load stored track. Error: {}", e);
    })?;
    let summary = algorithm::summarize(track.fixes());
    let json = TrackSummary::to_json(&summary).map_err(|e| {
        error!("Failed to encode summary. Error: {}", e);
    })?;
    println!("{json}");
    Ok(())
}

fn create_replay_module(
    eb: &EventBus,
    cli: &Cli,
    config: &CourseConfig,
) -> Result<ReplayLocationModule, ()> {
    let Some(fixes_file) = &cli.fixes_file else {
        error!("No recording specified. Use --fixes-file");
        let _ = Cli::command().print_help();
        return Err(());
    };
    let fixes = read_recording(fixes_file).map_err(|e| {
        error!(
            "Failed to read recording {}. Error: {}",
            fixes_file.to_string_lossy(),
            e
        );
    })?;
    ReplayLocationModule::new(
        eb.context(),
        fixes,
        config.batch_size,
        Duration::from_millis(config.batch_interval_ms),
    )
    .map_err(|e| {
        error!("Failed to create replay source. Error: {}", e);
    })
}

#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config(cli.config.as_deref())?;
    let store = FileTrackStore::new(&get_storage_dir(&cli)?).map_err(|e| {
        error!("Failed to open track store. Error: {}", e);
    })?;
    if cli.show_stored {
        return show_stored(&store).await;
    }

    let eb = EventBus::default();
    let mut replay = create_replay_module(&eb, &cli, &config)?;
    let mut course_session = CourseSession::new(eb.context(), config).map_err(|e| {
        error!("Invalid course configuration. Error: {}", e);
    })?;
    let mut storage = TrackStorage::new(store, eb.context());
    let mut console = Console::new(eb.context());

    let quit_sender = eb.context().sender;
    ctrlc::set_handler(move || {
        let _ = quit_sender.send(Event {
            kind: EventKind::QuitEvent,
        });
    })
    .map_err(|e| {
        error!("Failed to install Ctrl-C handler. Error: {}", e);
    })?;

    info!("Starting modules...");
    eb.publish(&Event {
        kind: EventKind::StartTrackingEvent,
    });
    let (replay, course_session, storage, console) = tokio::join!(
        replay.run(),
        course_session.run(),
        storage.run(),
        console.run()
    );
    replay.and(course_session).and(storage).and(console)
}
