// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Messaging between the modules of the course recorder.
//!
//! Every module owns a [`ModuleCtx`] connected to the same [`EventBus`] and
//! communicates only by publishing and receiving [`Event`]s.

use common::coordinate::GpsFix;
use common::status::LiveStatus;
use common::summary::TrackSummary;
use std::sync::Arc;
use strum_macros::EnumDiscriminants;

/// A message on the [`EventBus`].
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub kind: EventKind,
}

impl Event {
    pub fn event_type(&self) -> EventKindType {
        EventKindType::from(&self.kind)
    }
}

/// A request addressed to a module.
///
/// `id` and `sender_addr` are copied into the matching [`Response`] so the
/// requester can pick its answer from the bus.
#[derive(Clone, Debug, PartialEq)]
pub struct Request<T> {
    pub id: u64,
    pub sender_addr: u64,
    pub data: T,
}

impl Request<()> {
    pub fn empty_request(id: u64, sender_addr: u64) -> Arc<Request<()>> {
        Arc::new(Request {
            id,
            sender_addr,
            data: (),
        })
    }
}

/// The answer to a [`Request`].
#[derive(Clone, Debug, PartialEq)]
pub struct Response<T> {
    pub id: u64,
    pub receiver_addr: u64,
    pub data: T,
}

impl<T> Response<T> {
    pub fn new(id: u64, receiver_addr: u64, data: T) -> Self {
        Response {
            id,
            receiver_addr,
            data,
        }
    }
}

/// A batch of fixes in arrival order, shared between all receivers.
pub type FixBatchPtr = Arc<Vec<GpsFix>>;

pub type LiveStatusPtr = Arc<LiveStatus>;

pub type TrackSummaryPtr = Arc<TrackSummary>;

pub type EmptyRequestPtr = Arc<Request<()>>;

pub type SummaryResponsePtr = Arc<Response<TrackSummary>>;

/// A human readable description of a failure in a collaborating module.
pub type ErrorMessagePtr = Arc<String>;

/// All messages exchanged between the modules.
///
/// Large payloads are shared behind an [`Arc`] so publishing doesn't copy them.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EventKindType), derive(Hash))]
pub enum EventKind {
    /// Indicates that a module shall terminate.
    QuitEvent,

    /// Starts a new course session and the location source.
    StartTrackingEvent,

    /// Stops the location source, the recorded track is kept.
    StopTrackingEvent,

    /// Stops tracking and clears the recorded track.
    ResetEvent,

    /// Reports whether the location source is delivering fixes.
    TrackingStateEvent(bool),

    /// A batch of new fixes delivered by the location source.
    FixBatchEvent(FixBatchPtr),

    /// The location source failed, the affected batch is dropped.
    LocationErrorEvent(ErrorMessagePtr),

    /// Derived state of the course session after a batch was applied.
    LiveStatusEvent(LiveStatusPtr),

    /// The user returned to the start point. Carries the summary of the lap.
    CourseCompletedEvent(TrackSummaryPtr),

    /// Requests the summary of the currently recorded track.
    SummaryRequestEvent(EmptyRequestPtr),

    SummaryResponseEvent(SummaryResponsePtr),
}

/// Returns a reference to the payload of `$kind` if it is the variant `$variant`.
///
/// ```rust
/// use module_core::{EventKind, payload_ref};
///
/// let kind = EventKind::TrackingStateEvent(true);
/// assert_eq!(payload_ref!(kind, EventKind::TrackingStateEvent), Some(&true));
/// ```
#[macro_export]
macro_rules! payload_ref {
    ($kind:expr, $variant:path) => {
        match &$kind {
            $variant(payload) => Some(payload),
            _ => None,
        }
    };
}

/// Broadcasts [`Event`]s to every module of the application.
///
/// Every subscriber gets its own copy of each event published after it
/// subscribed. Events published without any subscriber are lost.
pub struct EventBus {
    sender: tokio::sync::broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a bus that buffers up to 100 events per subscriber.
    ///
    /// A subscriber that falls further behind loses the oldest events.
    pub fn new() -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(100);
        EventBus { sender }
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: &Event) {
        let _ = self.sender.send(event.clone());
    }

    /// Creates a [`ModuleCtx`] subscribed to this bus.
    pub fn context(&self) -> ModuleCtx {
        ModuleCtx::new(self)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit of the application driven by the events of the [`EventBus`].
#[async_trait::async_trait]
pub trait Module {
    /// Runs the event loop of the module until a [`EventKind::QuitEvent`] arrives.
    async fn run(&mut self) -> Result<(), ()>;
}

/// The connection of a single module to the [`EventBus`].
pub struct ModuleCtx {
    pub sender: tokio::sync::broadcast::Sender<Event>,
    pub receiver: tokio::sync::broadcast::Receiver<Event>,
}

impl ModuleCtx {
    pub fn new(event_bus: &EventBus) -> Self {
        ModuleCtx {
            sender: event_bus.sender.clone(),
            receiver: event_bus.subscribe(),
        }
    }

    /// Publishes an event of the given kind.
    ///
    /// Returns the number of subscribers that received the event, or an error
    /// if nobody is listening.
    pub fn publish_event(
        &self,
        kind: EventKind,
    ) -> Result<usize, tokio::sync::broadcast::error::SendError<Event>> {
        self.sender.send(Event { kind })
    }
}

pub mod test_helper;
