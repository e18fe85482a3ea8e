//! Tournament status machine.
//!
//! The stored `status` column is only a hint: it is rewritten lazily and may lag
//! behind the clock. Every mutating path consults [`status_of`] instead.

use chrono::{DateTime, Utc};
use models::domains::{sea_orm_active_enums::TournamentStatus, tournaments};

use crate::error::ArenaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentAction {
    Join,
    Submit,
    Cancel,
    View,
}

/// Status implied by the schedule at `now`. Cancellation and completion are terminal.
pub fn derive_status(
    stored: TournamentStatus,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> TournamentStatus {
    if stored.is_terminal() {
        return stored;
    }

    if now < start_time {
        TournamentStatus::Upcoming
    } else if now <= end_time {
        TournamentStatus::Active
    } else {
        TournamentStatus::Completed
    }
}

pub fn status_of(tournament: &tournaments::Model, now: DateTime<Utc>) -> TournamentStatus {
    derive_status(
        tournament.status,
        tournament.start_time,
        tournament.end_time,
        now,
    )
}

pub fn is_allowed(action: TournamentAction, status: TournamentStatus) -> bool {
    use TournamentStatus::*;

    match action {
        TournamentAction::Join => status == Upcoming,
        TournamentAction::Submit => status == Active,
        TournamentAction::Cancel => !status.is_terminal(),
        TournamentAction::View => true,
    }
}

pub fn ensure_allowed(
    action: TournamentAction,
    status: TournamentStatus,
) -> Result<(), ArenaError> {
    if is_allowed(action, status) {
        Ok(())
    } else {
        Err(ArenaError::InvalidState(status))
    }
}

/// Checked before the stored status column is rewritten.
pub fn validate_transition(from: TournamentStatus, to: TournamentStatus) -> Result<(), ArenaError> {
    use TournamentStatus::*;

    let legal = match (from, to) {
        (a, b) if a == b => true,
        (Upcoming, Active) | (Upcoming, Completed) | (Active, Completed) => true,
        (Upcoming, Cancelled) | (Active, Cancelled) => true,
        _ => false,
    };

    if legal {
        Ok(())
    } else {
        Err(ArenaError::InvalidState(from))
    }
}

/// Schedule rules for a new tournament.
pub fn validate_schedule(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), ArenaError> {
    if start_time <= now {
        return Err(ArenaError::validation("Start time must be in the future"));
    }
    if end_time <= start_time {
        return Err(ArenaError::validation("End time must be after start time"));
    }
    Ok(())
}
