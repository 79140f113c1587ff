// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{LocationError, LocationSource};
use common::coordinate::GpsFix;
use module_core::{ErrorMessagePtr, Event, EventKind, FixBatchPtr, Module, ModuleCtx};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug)]
struct ReplayConfig {
    fixes: Vec<GpsFix>,
    batch_size: usize,
    interval: std::time::Duration,
}

/// Replays a recorded course as if a location provider delivered it.
///
/// While active, the next `batch_size` fixes are published as one
/// [`EventKind::FixBatchEvent`] every `interval`. Recorded timestamps are kept.
/// Every start replays the recording from its beginning, once it is exhausted
/// the source becomes inactive.
pub struct ReplayLocationModule {
    ctx: ModuleCtx,
    config: Arc<ReplayConfig>,
    replay_task: Option<JoinHandle<()>>,
}

impl ReplayLocationModule {
    pub fn new(
        ctx: ModuleCtx,
        fixes: Vec<GpsFix>,
        batch_size: usize,
        interval: std::time::Duration,
    ) -> Result<Self, LocationError> {
        if fixes.is_empty() {
            return Err(LocationError::EmptyRecording);
        }
        if batch_size == 0 {
            return Err(LocationError::InvalidBatchSize);
        }
        Ok(ReplayLocationModule {
            ctx,
            config: Arc::new(ReplayConfig {
                fixes,
                batch_size,
                interval,
            }),
            replay_task: None,
        })
    }

    fn publish_tracking_state(&self) {
        let _ = self
            .ctx
            .publish_event(EventKind::TrackingStateEvent(self.is_active()));
    }

    fn publish_error(&self, e: &LocationError) {
        error!("Location source failed. Error: {}", e);
        let _ = self
            .ctx
            .publish_event(EventKind::LocationErrorEvent(ErrorMessagePtr::new(e.to_string())));
    }

    async fn handle_event(&mut self, event: Event) -> bool {
        let result = match event.kind {
            EventKind::QuitEvent => {
                let _ = self.stop().await;
                return false;
            }
            EventKind::StartTrackingEvent => self.start().await,
            EventKind::StopTrackingEvent | EventKind::ResetEvent => self.stop().await,
            _ => return true,
        };
        match result {
            Ok(()) => self.publish_tracking_state(),
            Err(e) => self.publish_error(&e),
        }
        true
    }
}

#[async_trait::async_trait]
impl LocationSource for ReplayLocationModule {
    async fn start(&mut self) -> Result<(), LocationError> {
        if self.is_active() {
            debug!("Replay already active");
            return Ok(());
        }
        let config = self.config.clone();
        let sender = self.ctx.sender.clone();
        self.replay_task = Some(tokio::spawn(async move {
            replay_task(sender, config).await;
        }));
        info!("Started replay of {} fixes", self.config.fixes.len());
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), LocationError> {
        let Some(task) = self.replay_task.take() else {
            return Ok(());
        };
        task.abort();
        match task.await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => {
                info!("Stopped replay");
                Ok(())
            }
            Err(e) => Err(LocationError::TaskFailed(e.to_string())),
        }
    }

    fn is_active(&self) -> bool {
        self.replay_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

#[async_trait::async_trait]
impl Module for ReplayLocationModule {
    async fn run(&mut self) -> Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => run = self.handle_event(event).await,
                        Err(e) => error!("Failed to receive event in module ReplayLocation. Error: {}", e),
                    }
                }
            }
        }
        Ok(())
    }
}

async fn replay_task(sender: tokio::sync::broadcast::Sender<Event>, config: Arc<ReplayConfig>) {
    let mut timer = tokio::time::interval(config.interval);
    for batch in config.fixes.chunks(config.batch_size) {
        timer.tick().await;
        debug!("Replaying batch of {} fixes", batch.len());
        let _ = sender.send(Event {
            kind: EventKind::FixBatchEvent(FixBatchPtr::new(batch.to_vec())),
        });
    }
    info!("Replay finished");
    let _ = sender.send(Event {
        kind: EventKind::TrackingStateEvent(false),
    });
}
