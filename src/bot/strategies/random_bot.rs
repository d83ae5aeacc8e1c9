//! Trivial reference strategy: draws from the deck, plays the first legal
//! combination it finds, calls ZapZap as soon as it's eligible. Grounded on
//! the reference's `EasyBotStrategy` (`infrastructure::bot::strategies::easy_bot`),
//! which takes the same "first legal move" shortcut rather than any lookahead.

use async_trait::async_trait;

use crate::domain::cards::is_zapzap_eligible;
use crate::domain::value_objects::{DrawSource, RoundPhase};

use super::super::strategy::{BotAction, BotStrategy, GameView};
use super::util::find_any_legal_play;

pub struct RandomStrategy;

#[async_trait]
impl BotStrategy for RandomStrategy {
    async fn decide(&self, view: &GameView<'_>) -> BotAction {
        match view.state.phase {
            RoundPhase::Draw => BotAction::Draw {
                source: DrawSource::Deck,
                discard_card_id: None,
            },
            _ => {
                let hand = view.hand();
                if is_zapzap_eligible(hand) {
                    return BotAction::ZapZap;
                }
                if let Some(play) = find_any_legal_play(hand) {
                    return BotAction::Play { card_ids: play };
                }
                // no legal combination and not eligible to call ZapZap: the
                // orchestrator treats a rejected action the same as a
                // timeout and falls back to a forced draw next tick.
                BotAction::ZapZap
            }
        }
    }
}
