use serde::Deserialize;
use utoipa::IntoParams;

use crate::domains::sea_orm_active_enums::TournamentStatus;

#[derive(Deserialize, Debug, Clone, IntoParams)]
pub struct TournamentPaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Filter by clock-derived status.
    pub status: Option<TournamentStatus>,
}

impl Default for TournamentPaginationQuery {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(10),
            status: None,
        }
    }
}
