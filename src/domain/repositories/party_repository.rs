use async_trait::async_trait;

use crate::domain::entities::{Party, PartyPlayer, Round};
use crate::domain::value_objects::GameState;
use crate::errors::ActionError;

/// Persistence contract for parties, their seated players, and the active
/// round. Narrowed from the reference's repository (which also carried
/// admin listings and a game-action audit log) to exactly what the action
/// API and bot orchestrator need.
#[async_trait]
pub trait PartyRepository: Send + Sync {
    async fn create_party(&self, party: Party) -> Result<Party, ActionError>;
    async fn get_party(&self, party_id: &str) -> Result<Option<Party>, ActionError>;
    async fn update_party(&self, party: Party) -> Result<Party, ActionError>;
    async fn delete_party(&self, party_id: &str) -> Result<(), ActionError>;
    async fn find_party_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<Party>, ActionError>;

    async fn list_players(&self, party_id: &str) -> Result<Vec<PartyPlayer>, ActionError>;
    async fn upsert_player(&self, player: PartyPlayer) -> Result<PartyPlayer, ActionError>;
    async fn remove_player(&self, party_id: &str, user_id: &str) -> Result<(), ActionError>;

    async fn get_active_round(&self, party_id: &str) -> Result<Option<Round>, ActionError>;
    async fn save_round(&self, round: Round) -> Result<Round, ActionError>;

    async fn get_game_state(&self, round_id: &str) -> Result<Option<GameState>, ActionError>;
    async fn save_game_state(
        &self,
        round_id: &str,
        state: GameState,
    ) -> Result<(), ActionError>;

    /// List every party currently `playing`, for the bot orchestrator's scan.
    async fn list_active_parties(&self) -> Result<Vec<Party>, ActionError>;
}
