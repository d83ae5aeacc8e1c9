//! Bot strategy contract.
//!
//! Mirrors the reference's `BotStrategy` trait (`infrastructure::bot::strategies`)
//! but trims the interface to what a strategy can actually decide: which
//! action to take given a read-only view of its own seat. Concrete,
//! interesting strategies are out of scope (spec.md Non-goals); the two
//! implementations here exist only to exercise the orchestrator.

use async_trait::async_trait;

use crate::domain::value_objects::{DrawSource, GameState};

/// Read-only view of the round handed to a strategy. A real strategy would
/// also want the discard pile history and opponents' hand sizes; both are
/// already on `GameState` and reachable through `state`, kept by reference
/// rather than copied into a bespoke projection.
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub seat: u8,
}

impl<'a> GameView<'a> {
    pub fn hand(&self) -> &[u8] {
        self.state.hand(self.seat)
    }
}

/// An action a strategy can choose to submit through the action api.
#[derive(Debug, Clone)]
pub enum BotAction {
    Draw {
        source: DrawSource,
        discard_card_id: Option<u8>,
    },
    Play {
        card_ids: Vec<u8>,
    },
    ZapZap,
}

#[async_trait]
pub trait BotStrategy: Send + Sync {
    /// Decide the next action for the seat described by `view`. Strategies
    /// are expected to return promptly; the orchestrator enforces its own
    /// deadline regardless and falls back to a forced draw on timeout.
    async fn decide(&self, view: &GameView<'_>) -> BotAction;
}
