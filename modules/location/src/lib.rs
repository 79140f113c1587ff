// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Location Modul for the course recorder
//!
//! Provides the interface of a location source that delivers batches of fixes
//! and a source replaying a recorded course.

use thiserror::Error;

pub mod recording;
pub mod replay_source;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("the recording contains no fixes")]
    EmptyRecording,

    #[error("batch size must be at least one fix")]
    InvalidBatchSize,

    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid record {line} in recording: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("location task stopped unexpectedly: {0}")]
    TaskFailed(String),
}

/// A producer of fixes that can be started and stopped.
///
/// While active, a source publishes every new batch of fixes as
/// [`FixBatchEvent`](module_core::EventKind::FixBatchEvent) in the order the
/// fixes arrived. Sources never touch the recorded track themselves.
#[async_trait::async_trait]
pub trait LocationSource {
    /// Starts delivering fixes. Starting an active source does nothing.
    async fn start(&mut self) -> Result<(), LocationError>;

    /// Stops delivering fixes. Stopping an inactive source does nothing.
    async fn stop(&mut self) -> Result<(), LocationError>;

    /// Returns `true` while the source delivers fixes.
    fn is_active(&self) -> bool;
}
