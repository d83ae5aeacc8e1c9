use serde::{Deserialize, Serialize};

/// Party configuration chosen at creation time and fixed for its lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySettings {
    /// Number of seats, 3..=8.
    pub player_count: u8,
    /// Cards dealt per player at the start of each round, 5..=7.
    pub hand_size: u8,
}

impl Default for PartySettings {
    fn default() -> Self {
        Self {
            player_count: 4,
            hand_size: 5,
        }
    }
}

impl PartySettings {
    pub fn new(player_count: u8, hand_size: u8) -> Self {
        Self {
            player_count,
            hand_size,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !(3..=8).contains(&self.player_count) {
            return Err("playerCount must be between 3 and 8");
        }
        if !(5..=7).contains(&self.hand_size) {
            return Err("handSize must be between 5 and 7");
        }
        Ok(())
    }
}
