// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Storage Modul for the course recorder
//!
//! Persists the fixes of the running course session on linux based systems so a
//! recorded track survives a restart of the application.

use common::{
    coordinate::GpsFix,
    track::{Track, TrackError},
};
use module_core::{EventKind, ModuleCtx};
use std::{
    fs::DirBuilder,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, error, info};

const TRACK_FILE_NAME: &str = "track.jsonl";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("track file access failed: {0}")]
    Io(#[from] io::Error),

    #[error("batch rejected: {0}")]
    InvalidBatch(#[from] TrackError),

    #[error("failed to encode fix: {0}")]
    Encode(serde_json::Error),

    #[error("invalid fix in line {line}: {source}")]
    InvalidRecord {
        line: usize,
        source: serde_json::Error,
    },
}

/// An append-only track file.
///
/// Every fix is stored as one JSON object per line in `track.jsonl` inside the
/// root directory.
///
/// ## Important
///
/// `FileTrackStore` **does not implement any internal synchronization or locking mechanisms**.
/// Only one instance should be used per `root_dir` in the application at any time.
pub struct FileTrackStore {
    file_path: PathBuf,
}

impl FileTrackStore {
    /// Creates the store and its root directory if it doesn't exist.
    pub fn new(root_dir: &Path) -> Result<Self, StoreError> {
        DirBuilder::new().recursive(true).create(root_dir)?;
        let file_path = root_dir.join(TRACK_FILE_NAME);
        info!("Using track file: {}", file_path.to_string_lossy());
        Ok(FileTrackStore { file_path })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Appends a batch of fixes and flushes them to disk.
    ///
    /// The batch is checked and encoded completely before anything is written,
    /// a batch the track would reject leaves the file untouched.
    pub async fn append(&self, fixes: &[GpsFix]) -> Result<(), StoreError> {
        Track::check_batch(fixes)?;
        let mut lines = String::new();
        for fix in fixes {
            lines.push_str(&fix.to_json().map_err(StoreError::Encode)?);
            lines.push('\n');
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .await?;
        file.write_all(lines.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Loads all stored fixes in the order they were appended.
    ///
    /// A missing track file is an empty track.
    pub async fn load(&self) -> Result<Track, StoreError> {
        let mut content = String::new();
        match tokio::fs::File::open(&self.file_path).await {
            Ok(mut file) => {
                file.read_to_string(&mut content).await?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Track::default()),
            Err(e) => return Err(e.into()),
        }
        let mut fixes = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fix = GpsFix::from_json(line).map_err(|source| StoreError::InvalidRecord {
                line: index + 1,
                source,
            })?;
            fixes.push(fix);
        }
        Ok(Track::from(fixes))
    }

    /// Removes all stored fixes.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let file = tokio::fs::File::create(&self.file_path).await?;
        file.sync_all().await?;
        Ok(())
    }
}

/// Persists the fix batches of the running course session.
///
/// Recording starts with a [`EventKind::StartTrackingEvent`], which discards the
/// previously stored track, and ends when tracking is stopped or the location
/// source runs dry. A [`EventKind::ResetEvent`] also discards the stored track.
pub struct TrackStorage {
    store: FileTrackStore,
    module_ctx: ModuleCtx,
    recording: bool,
}

impl TrackStorage {
    pub fn new(store: FileTrackStore, ctx: ModuleCtx) -> Self {
        TrackStorage {
            store,
            module_ctx: ctx,
            recording: false,
        }
    }

    async fn clear_store(&self) {
        match self.store.clear().await {
            Ok(()) => debug!("Cleared track file {}", self.store.file_path().to_string_lossy()),
            Err(e) => error!("Failed to clear track file. Error: {}", e),
        }
    }

    async fn handle_fix_batch(&self, fixes: &[GpsFix]) {
        if !self.recording {
            return;
        }
        if let Err(e) = self.store.append(fixes).await {
            error!("Failed to store batch of {} fixes. Error: {}", fixes.len(), e);
        }
    }
}

#[async_trait::async_trait]
impl module_core::Module for TrackStorage {
    async fn run(&mut self) -> Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                event = self.module_ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            match event.kind {
                                EventKind::QuitEvent => run = false,
                                EventKind::StartTrackingEvent => {
                                    self.clear_store().await;
                                    self.recording = true;
                                }
                                EventKind::StopTrackingEvent | EventKind::TrackingStateEvent(false) => {
                                    self.recording = false;
                                }
                                EventKind::ResetEvent => {
                                    self.recording = false;
                                    self.clear_store().await;
                                }
                                EventKind::FixBatchEvent(fixes) => {
                                    self.handle_fix_batch(&fixes).await;
                                }
                                _ => ()
                            }
                        }
                        Err(e) => error!("Failed to receive event in module TrackStorage. Error: {}", e),
                    }
                }
            }
        }
        Ok(())
    }
}
