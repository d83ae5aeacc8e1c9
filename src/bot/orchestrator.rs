//! Bot orchestrator: one long-lived tick loop that scans every `playing`
//! party, finds seats whose turn belongs to a bot, and commits a decision
//! through the same action api a human client would use.
//!
//! The reference engine triggers a bot move with `tokio::spawn` plus a
//! fixed delay right after the preceding handler returns
//! (`api::routes::game`). That couples bot scheduling to request handling
//! and gives no deadline enforcement. This instead runs independently of
//! any request, on its own interval, and bounds each strategy call with a
//! timeout, grounded on the coordinator tick-loop pattern used for a
//! different per-key worker in the pack (`wu-s-john-legit-poker`'s
//! `game::coordinator::manager`).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::action_api::{
    call_zapzap, draw_card, play_cards, CallZapZapInput, DrawCardInput, PlayCardsInput,
};
use crate::domain::entities::BotDifficulty;
use crate::domain::value_objects::{DrawSource, RoundPhase};
use crate::Core;

use super::strategies::{ForfeitStrategy, RandomStrategy};
use super::strategy::{BotAction, BotStrategy, GameView};

pub struct OrchestratorConfig {
    pub tick_interval: Duration,
    pub strategy_deadline: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1000),
            strategy_deadline: Duration::from_secs(5),
        }
    }
}

pub struct BotOrchestrator {
    core: Arc<Core>,
    config: OrchestratorConfig,
    strategies: HashMap<BotDifficulty, Box<dyn BotStrategy>>,
}

impl BotOrchestrator {
    pub fn new(core: Arc<Core>, config: OrchestratorConfig) -> Self {
        let mut strategies: HashMap<BotDifficulty, Box<dyn BotStrategy>> = HashMap::new();
        strategies.insert(BotDifficulty::Random, Box::new(RandomStrategy));
        strategies.insert(BotDifficulty::Forfeit, Box::new(ForfeitStrategy));
        Self {
            core,
            config,
            strategies,
        }
    }

    /// Run the tick loop forever. Intended to be spawned once at startup.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.config.tick_interval);
        loop {
            interval.tick().await;
            if let Err(err) = self.tick().await {
                error!(%err, "bot orchestrator tick failed");
            }
        }
    }

    async fn tick(&self) -> Result<(), crate::errors::ActionError> {
        let parties = self.core.parties.list_active_parties().await?;
        for party in parties {
            if let Err(err) = self.tick_party(&party.id).await {
                warn!(party_id = %party.id, %err, "bot tick failed for party");
            }
        }
        Ok(())
    }

    async fn tick_party(&self, party_id: &str) -> Result<(), crate::errors::ActionError> {
        let Some(round) = self.core.parties.get_active_round(party_id).await? else {
            return Ok(());
        };
        if round.status != crate::domain::entities::RoundStatus::Active {
            return Ok(());
        }
        let Some(state) = self.core.parties.get_game_state(&round.id).await? else {
            return Ok(());
        };
        if state.phase == RoundPhase::Finished {
            return Ok(());
        }

        let players = self.core.parties.list_players(party_id).await?;
        let Some(seated) = players.iter().find(|p| p.player_index == state.current_turn) else {
            return Ok(());
        };
        let Some(user) = self.core.users.get_user(&seated.user_id).await? else {
            return Ok(());
        };
        if !user.is_bot() {
            return Ok(());
        }
        let difficulty = user.bot_difficulty.unwrap_or(BotDifficulty::Forfeit);
        let strategy = self
            .strategies
            .get(&difficulty)
            .map(|s| s.as_ref())
            .unwrap_or(&ForfeitStrategy);

        let view = GameView {
            state: &state,
            seat: state.current_turn,
        };
        let action = match timeout(self.config.strategy_deadline, strategy.decide(&view)).await {
            Ok(action) => action,
            Err(_) => {
                debug!(party_id, seat = state.current_turn, "bot strategy deadline exceeded, forcing draw");
                BotAction::Draw {
                    source: DrawSource::Deck,
                    discard_card_id: None,
                }
            }
        };

        self.commit(party_id, &seated.user_id, action).await
    }

    async fn commit(
        &self,
        party_id: &str,
        user_id: &str,
        action: BotAction,
    ) -> Result<(), crate::errors::ActionError> {
        match action {
            BotAction::Draw {
                source,
                discard_card_id,
            } => {
                draw_card(
                    &self.core,
                    DrawCardInput {
                        party_id: party_id.to_string(),
                        user_id: user_id.to_string(),
                        source,
                        discard_card_id,
                    },
                )
                .await?;
            }
            BotAction::Play { card_ids } => {
                play_cards(
                    &self.core,
                    PlayCardsInput {
                        party_id: party_id.to_string(),
                        user_id: user_id.to_string(),
                        card_ids,
                    },
                )
                .await?;
            }
            BotAction::ZapZap => {
                call_zapzap(
                    &self.core,
                    CallZapZapInput {
                        party_id: party_id.to_string(),
                        user_id: user_id.to_string(),
                    },
                )
                .await?;
            }
        }
        Ok(())
    }
}
