use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{cache::TournamentLocks, config::Config, core::Notifier};

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub config: Config,
    pub notifier: Arc<dyn Notifier>,
    pub tournament_locks: TournamentLocks,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            conn,
            config,
            notifier,
            tournament_locks: TournamentLocks::new(),
        }
    }
}
