//! In-memory repository implementation for tests and the demo binary.
//!
//! Grounded on the reference's `llm_memories`-style `Arc<RwLock<HashMap<..>>>`
//! maps (`infrastructure::app_state::AppState`): plain maps behind a
//! `tokio::sync::RwLock`, no persistence across process restarts. Not meant
//! for production use (spec.md Non-goals: durable storage).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{Party, PartyPlayer, PartyStatus, Round, User};
use crate::domain::repositories::{PartyRepository, UserRepository};
use crate::domain::value_objects::GameState;
use crate::errors::ActionError;

#[derive(Default)]
pub struct InMemoryPartyRepository {
    parties: RwLock<HashMap<String, Party>>,
    players: RwLock<HashMap<String, Vec<PartyPlayer>>>,
    rounds: RwLock<HashMap<String, Round>>,
    game_states: RwLock<HashMap<String, GameState>>,
}

impl InMemoryPartyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartyRepository for InMemoryPartyRepository {
    async fn create_party(&self, party: Party) -> Result<Party, ActionError> {
        let mut parties = self.parties.write().await;
        if parties.contains_key(&party.id) {
            return Err(ActionError::Conflict("party already exists".into()));
        }
        parties.insert(party.id.clone(), party.clone());
        Ok(party)
    }

    async fn get_party(&self, party_id: &str) -> Result<Option<Party>, ActionError> {
        Ok(self.parties.read().await.get(party_id).cloned())
    }

    async fn update_party(&self, party: Party) -> Result<Party, ActionError> {
        let mut parties = self.parties.write().await;
        parties.insert(party.id.clone(), party.clone());
        Ok(party)
    }

    async fn delete_party(&self, party_id: &str) -> Result<(), ActionError> {
        self.parties.write().await.remove(party_id);
        self.players.write().await.remove(party_id);
        Ok(())
    }

    async fn find_party_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<Party>, ActionError> {
        Ok(self
            .parties
            .read()
            .await
            .values()
            .find(|p| p.invite_code == invite_code)
            .cloned())
    }

    async fn list_players(&self, party_id: &str) -> Result<Vec<PartyPlayer>, ActionError> {
        Ok(self
            .players
            .read()
            .await
            .get(party_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_player(&self, player: PartyPlayer) -> Result<PartyPlayer, ActionError> {
        let mut players = self.players.write().await;
        let seats = players.entry(player.party_id.clone()).or_default();
        if let Some(existing) = seats.iter_mut().find(|p| p.user_id == player.user_id) {
            *existing = player.clone();
        } else {
            seats.push(player.clone());
        }
        Ok(player)
    }

    async fn remove_player(&self, party_id: &str, user_id: &str) -> Result<(), ActionError> {
        let mut players = self.players.write().await;
        if let Some(seats) = players.get_mut(party_id) {
            seats.retain(|p| p.user_id != user_id);
            seats.sort_by_key(|p| p.player_index);
            for (index, seat) in seats.iter_mut().enumerate() {
                seat.player_index = index as u8;
            }
        }
        Ok(())
    }

    async fn get_active_round(&self, party_id: &str) -> Result<Option<Round>, ActionError> {
        let parties = self.parties.read().await;
        let Some(party) = parties.get(party_id) else {
            return Ok(None);
        };
        let Some(round_id) = &party.current_round_id else {
            return Ok(None);
        };
        Ok(self.rounds.read().await.get(round_id).cloned())
    }

    async fn save_round(&self, round: Round) -> Result<Round, ActionError> {
        self.rounds
            .write()
            .await
            .insert(round.id.clone(), round.clone());
        Ok(round)
    }

    async fn get_game_state(&self, round_id: &str) -> Result<Option<GameState>, ActionError> {
        Ok(self.game_states.read().await.get(round_id).cloned())
    }

    async fn save_game_state(&self, round_id: &str, state: GameState) -> Result<(), ActionError> {
        self.game_states
            .write()
            .await
            .insert(round_id.to_string(), state);
        Ok(())
    }

    async fn list_active_parties(&self) -> Result<Vec<Party>, ActionError> {
        Ok(self
            .parties
            .read()
            .await
            .values()
            .filter(|p| p.status == PartyStatus::Playing)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: User) -> Result<User, ActionError> {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, ActionError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn list_users(&self, user_ids: &[String]) -> Result<Vec<User>, ActionError> {
        let users = self.users.read().await;
        Ok(user_ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}
