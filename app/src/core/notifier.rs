//! Best-effort fan-out of tournament events to the tournament's room.

use std::sync::Mutex;

use socketioxide::SocketIo;
use tracing::{debug, warn};

use super::dtos::TournamentEvent;

/// Publishes an event to everyone subscribed to a tournament.
///
/// Fire-and-forget: implementations never block the caller on delivery and
/// never report failures back to it.
pub trait Notifier: Send + Sync {
    fn publish(&self, tournament_id: &str, event: TournamentEvent);
}

/// Delivers through the socket.io room named after the tournament id.
#[derive(Clone)]
pub struct SocketNotifier {
    io: SocketIo,
}

impl SocketNotifier {
    pub fn new(io: SocketIo) -> Self {
        Self { io }
    }
}

impl Notifier for SocketNotifier {
    fn publish(&self, tournament_id: &str, event: TournamentEvent) {
        let io = self.io.clone();
        let room = tournament_id.to_owned();

        tokio::spawn(async move {
            debug!(tournament_id = %room, event = event.name(), "broadcasting");
            if let Err(e) = io.to(room.clone()).emit(event.name(), &event).await {
                warn!(tournament_id = %room, event = event.name(), "broadcast failed: {}", e);
            }
        });
    }
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, _tournament_id: &str, _event: TournamentEvent) {}
}

/// Keeps every published event in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(String, TournamentEvent)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, TournamentEvent)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, tournament_id: &str, event: TournamentEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push((tournament_id.to_owned(), event));
        }
    }
}
