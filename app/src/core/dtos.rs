use models::schemas::leaderboard::LeaderboardEntry;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantJoinedPayload {
    pub participant_count: i32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFinishedPayload {
    /// User id of the submitter.
    pub participant_id: String,
    pub score: i32,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Inbound answer relay from a playing client.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TournamentAnswerPayload {
    pub tournament_id: String,
    #[serde(default)]
    pub answer: serde_json::Value,
    #[serde(default)]
    pub time_left: serde_json::Value,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAnsweredPayload {
    pub player_id: String,
    pub answer: serde_json::Value,
    pub time_left: serde_json::Value,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TournamentEvent {
    ParticipantJoined(ParticipantJoinedPayload),
    ParticipantFinished(ParticipantFinishedPayload),
    PlayerAnswered(PlayerAnsweredPayload),
}

impl TournamentEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ParticipantJoined(_) => "participant-joined",
            Self::ParticipantFinished(_) => "participant-finished",
            Self::PlayerAnswered(_) => "player-answered",
        }
    }
}
