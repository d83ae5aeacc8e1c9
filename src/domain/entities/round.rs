use serde::{Deserialize, Serialize};

/// Round lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Active,
    Finished,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Active => "active",
            RoundStatus::Finished => "finished",
        }
    }
}

/// One deal-to-score cycle of a party.
///
/// `current_turn` and `current_action` mirror the same fields on the round's
/// `GameState` so callers can answer "whose turn, what phase" without loading
/// the (larger) game state blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    pub party_id: String,
    pub round_number: u32,
    pub status: RoundStatus,
    pub current_turn: u8,
    pub current_action: String,
    pub starting_player: u8,
    pub created_at: i64,
    pub finished_at: Option<i64>,
}

impl Round {
    pub fn new(id: String, party_id: String, round_number: u32, starting_player: u8) -> Self {
        Self {
            id,
            party_id,
            round_number,
            status: RoundStatus::Active,
            current_turn: starting_player,
            current_action: "draw".to_string(),
            starting_player,
            created_at: chrono::Utc::now().timestamp(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.status = RoundStatus::Finished;
        self.finished_at = Some(chrono::Utc::now().timestamp());
    }
}
