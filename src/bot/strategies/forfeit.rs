//! Minimal strategy used both as a selectable `BotDifficulty` and as the
//! orchestrator's own deadline fallback: always draws from the deck when a
//! draw is owed, and otherwise plays whatever legal combination it can find
//! without trying to optimize for it. Grounded on the reference's timeout
//! behavior in `api::routes::game`, which defaults an unresponsive turn to a
//! deck draw rather than leaving the round stalled.

use async_trait::async_trait;

use crate::domain::value_objects::{DrawSource, RoundPhase};

use super::super::strategy::{BotAction, BotStrategy, GameView};
use super::util::find_any_legal_play;

pub struct ForfeitStrategy;

#[async_trait]
impl BotStrategy for ForfeitStrategy {
    async fn decide(&self, view: &GameView<'_>) -> BotAction {
        match view.state.phase {
            RoundPhase::Draw => BotAction::Draw {
                source: DrawSource::Deck,
                discard_card_id: None,
            },
            _ => match find_any_legal_play(view.hand()) {
                Some(card_ids) => BotAction::Play { card_ids },
                None => BotAction::ZapZap,
            },
        }
    }
}
