use serde::Serialize;
use utoipa::ToSchema;

/// Body of every failed request.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable kind, e.g. `TOURNAMENT_FULL`.
    #[schema(example = "TOURNAMENT_FULL")]
    pub code: &'static str,
    #[schema(example = "Tournament is full")]
    pub message: String,
}
