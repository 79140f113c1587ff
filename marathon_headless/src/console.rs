// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::summary::TrackSummary;
use module_core::{Event, EventKind, Module, ModuleCtx, Request};
use tracing::{error, info};

const CONSOLE_ADDR: u64 = 1;

/// Reports the course on the terminal and ends the application once the
/// course is finished.
///
/// The course is finished when it was completed or when the location source
/// ran dry. In the latter case the summary of the recorded part is requested
/// from the course session.
pub struct Console {
    ctx: ModuleCtx,
    finished: bool,
    request_id: u64,
}

impl Console {
    pub fn new(ctx: ModuleCtx) -> Self {
        Console {
            ctx,
            finished: false,
            request_id: 0,
        }
    }

    fn finish(&mut self, headline: &str, summary: &TrackSummary) {
        self.finished = true;
        match TrackSummary::to_json(summary) {
            Ok(json) => println!("{headline}\n{json}"),
            Err(e) => error!("Failed to encode summary. Error: {}", e),
        }
        let _ = self.ctx.publish_event(EventKind::QuitEvent);
    }

    fn request_summary(&mut self) {
        self.request_id += 1;
        let request = Request::empty_request(self.request_id, CONSOLE_ADDR);
        let _ = self
            .ctx
            .publish_event(EventKind::SummaryRequestEvent(request));
    }

    fn handle_event(&mut self, event: Event) -> bool {
        match event.kind {
            EventKind::QuitEvent => return false,
            EventKind::LiveStatusEvent(status) => {
                info!(
                    "Fixes: {}, inside start: {}, approaching finish: {}, heading consistent: {}",
                    status.fix_count,
                    status.inside_boundary,
                    status.approaching_finish,
                    status.heading_consistent
                );
            }
            EventKind::CourseCompletedEvent(summary) if !self.finished => {
                self.finish("Course completed", &summary);
            }
            EventKind::TrackingStateEvent(false) if !self.finished => {
                info!("Location source stopped before the course was completed");
                self.request_summary();
            }
            EventKind::SummaryResponseEvent(response)
                if !self.finished
                    && response.receiver_addr == CONSOLE_ADDR
                    && response.id == self.request_id =>
            {
                self.finish("Course not completed", &response.data);
            }
            EventKind::LocationErrorEvent(e) => error!("Location error: {}", e),
            _ => (),
        }
        true
    }
}

#[async_trait::async_trait]
impl Module for Console {
    async fn run(&mut self) -> Result<(), ()> {
        let mut run = true;
        while run {
            match self.ctx.receiver.recv().await {
                Ok(event) => run = self.handle_event(event),
                Err(e) => error!("Failed to receive event in module Console. Error: {}", e),
            }
        }
        Ok(())
    }
}
