use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PartySettings;

/// Party visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyVisibility {
    Public,
    Private,
}

impl PartyVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyVisibility::Public => "public",
            PartyVisibility::Private => "private",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "public" => Some(PartyVisibility::Public),
            "private" => Some(PartyVisibility::Private),
            _ => None,
        }
    }
}

/// Party lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
    Waiting,
    Playing,
    Finished,
}

impl PartyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyStatus::Waiting => "waiting",
            PartyStatus::Playing => "playing",
            PartyStatus::Finished => "finished",
        }
    }
}

/// A room of 3-8 seats playing one game of ZapZap.
///
/// Invariants: `players.len() <= settings.player_count`; `owner_id` is among
/// the players while `status != Finished`; once `Finished` the party is
/// immutable except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub invite_code: String,
    pub visibility: PartyVisibility,
    pub status: PartyStatus,
    pub settings: PartySettings,
    pub current_round_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Party {
    pub fn new(
        id: String,
        name: String,
        owner_id: String,
        invite_code: String,
        visibility: PartyVisibility,
        settings: PartySettings,
    ) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id,
            name,
            owner_id,
            invite_code,
            visibility,
            status: PartyStatus::Waiting,
            settings,
            current_round_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_full(&self, current_player_count: usize) -> bool {
        current_player_count >= self.settings.player_count as usize
    }

    pub fn can_start(&self, current_player_count: usize) -> bool {
        self.status == PartyStatus::Waiting
            && current_player_count >= 3
            && current_player_count <= self.settings.player_count as usize
    }

    pub fn start(&mut self) {
        self.status = PartyStatus::Playing;
        self.updated_at = chrono::Utc::now().timestamp();
    }

    pub fn finish(&mut self) {
        self.status = PartyStatus::Finished;
        self.updated_at = chrono::Utc::now().timestamp();
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp();
    }
}

/// Generate a random 8-character invite code from an ambiguity-free alphabet.
pub fn generate_invite_code() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
