use serde::{Deserialize, Serialize};

/// A seat inside a party, identified by `(party_id, user_id)`.
///
/// Invariants: `player_index` values are contiguous `0..n` while the party is
/// `Waiting`; no duplicate `user_id` within a party.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyPlayer {
    pub party_id: String,
    pub user_id: String,
    pub player_index: u8,
    pub joined_at: i64,
}

impl PartyPlayer {
    pub fn new(party_id: String, user_id: String, player_index: u8) -> Self {
        Self {
            party_id,
            user_id,
            player_index,
            joined_at: chrono::Utc::now().timestamp(),
        }
    }
}
