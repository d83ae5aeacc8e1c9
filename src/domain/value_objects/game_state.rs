//! Per-round mutable game state.
//!
//! Layout mirrors the reference engine's compact `GameState`
//! (fixed-size seat arrays, `SmallVec` hands) but trims the fields that only
//! existed to serve HTTP responses or bot card-counting heuristics, and adds
//! the fields spec.md's data model names that the reference folded into
//! ad-hoc JSON (`zapZapCaller`, a typed `lastAction`).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum seats a party can have.
pub const MAX_PLAYERS: usize = 8;
/// Inline capacity for a hand before it spills to the heap.
const MAX_HAND_SIZE: usize = 12;

/// Current phase of the seat whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Draw,
    Play,
    Finished,
}

/// Where a draw was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawSource {
    Deck,
    Discard,
}

/// Kind of the last action recorded against a round, for event payloads and
/// clients reconciling after a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Play,
    Draw,
    ZapZap,
}

/// Record of the most recent action taken in a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub player_index: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_ids: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DrawSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_reshuffled: Option<bool>,
    pub timestamp: i64,
}

/// Outcome of a ZapZap call, computed by `crate::domain::cards::score_round`.
#[derive(Debug, Clone)]
pub struct ZapZapOutcome {
    /// Per-seat score delta to add to `scores_cumulative`, indexed by seat.
    pub per_seat_delta: Vec<u16>,
    pub counteracted: bool,
    /// Seat with the lowest penalty value (the round's effective winner).
    pub lowest_seat: u8,
}

/// Per-round mutable state: deck, discard, hands, turn cursor, phase.
///
/// Invariants (spec.md §3 GameState):
/// (a) every card id 0..54 appears exactly once across
///     `deck ∪ discard_top ∪ Σ hands ∪ played_history`;
/// (b) `hands[i].len() >= 0` always (no lower bound beyond empty);
/// (c) `deck` is non-empty at the start of any draw phase, ensured by the
///     reshuffle protocol in `domain::services::game_service::execute_draw`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub deck: Vec<u8>,
    pub hands: [SmallVec<[u8; MAX_HAND_SIZE]>; MAX_PLAYERS],
    /// The combination most recently played; individually drawable until superseded.
    pub discard_top: SmallVec<[u8; 8]>,
    /// Every played combination no longer selectable, pooled back into the
    /// deck on reshuffle (spec.md §4.2 Draw, §9 "whole history" decision).
    pub played_history: Vec<u8>,
    pub scores_cumulative: [u16; MAX_PLAYERS],
    pub eliminated_mask: u8,
    pub current_turn: u8,
    pub starting_player: u8,
    pub phase: RoundPhase,
    pub round_number: u32,
    pub player_count: u8,
    pub is_golden_score: bool,
    pub last_action: Option<LastAction>,
    pub zapzap_caller: Option<u8>,
}

impl GameState {
    pub fn new(player_count: u8, round_number: u32, starting_player: u8, scores: &[u16]) -> Self {
        let mut scores_cumulative = [0u16; MAX_PLAYERS];
        for (i, &s) in scores.iter().enumerate().take(MAX_PLAYERS) {
            scores_cumulative[i] = s;
        }
        GameState {
            deck: Vec::with_capacity(54),
            hands: Default::default(),
            discard_top: SmallVec::new(),
            played_history: Vec::with_capacity(54),
            scores_cumulative,
            eliminated_mask: 0,
            current_turn: starting_player,
            starting_player,
            phase: RoundPhase::Draw,
            round_number,
            player_count,
            is_golden_score: false,
            last_action: None,
            zapzap_caller: None,
        }
    }

    #[inline]
    pub fn is_eliminated(&self, seat: u8) -> bool {
        (self.eliminated_mask & (1 << seat)) != 0
    }

    #[inline]
    pub fn eliminate(&mut self, seat: u8) {
        self.eliminated_mask |= 1 << seat;
    }

    pub fn active_seats(&self) -> SmallVec<[u8; MAX_PLAYERS]> {
        (0..self.player_count)
            .filter(|&s| !self.is_eliminated(s))
            .collect()
    }

    pub fn active_seat_count(&self) -> u8 {
        self.active_seats().len() as u8
    }

    #[inline]
    pub fn hand(&self, seat: u8) -> &[u8] {
        &self.hands[seat as usize]
    }

    #[inline]
    pub fn hand_mut(&mut self, seat: u8) -> &mut SmallVec<[u8; MAX_HAND_SIZE]> {
        &mut self.hands[seat as usize]
    }

    #[inline]
    pub fn score(&self, seat: u8) -> u16 {
        self.scores_cumulative[seat as usize]
    }

    #[inline]
    pub fn add_score(&mut self, seat: u8, delta: u16) {
        self.scores_cumulative[seat as usize] += delta;
    }

    /// Advance `current_turn` to the next non-eliminated seat.
    pub fn advance_turn(&mut self) {
        let mut next = (self.current_turn + 1) % self.player_count;
        let mut attempts = 0;
        while self.is_eliminated(next) && attempts < self.player_count {
            next = (next + 1) % self.player_count;
            attempts += 1;
        }
        self.current_turn = next;
    }

    /// Next non-eliminated seat after `seat`, for round-starter rotation.
    pub fn next_active_seat_after(&self, seat: u8) -> u8 {
        let mut next = (seat + 1) % self.player_count;
        let mut attempts = 0;
        while self.is_eliminated(next) && attempts < self.player_count {
            next = (next + 1) % self.player_count;
            attempts += 1;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_in_draw_phase() {
        let state = GameState::new(4, 1, 0, &[0, 0, 0, 0]);
        assert_eq!(state.phase, RoundPhase::Draw);
        assert_eq!(state.current_turn, 0);
        assert_eq!(state.active_seat_count(), 4);
    }

    #[test]
    fn advance_turn_skips_eliminated_seats() {
        let mut state = GameState::new(4, 1, 0, &[0, 0, 0, 0]);
        state.eliminate(1);
        state.current_turn = 0;
        state.advance_turn();
        assert_eq!(state.current_turn, 2);
        state.advance_turn();
        assert_eq!(state.current_turn, 3);
        state.advance_turn();
        assert_eq!(state.current_turn, 0);
    }

    #[test]
    fn next_active_seat_after_skips_eliminated() {
        let mut state = GameState::new(4, 1, 0, &[0, 0, 0, 0]);
        state.eliminate(1);
        assert_eq!(state.next_active_seat_after(0), 2);
    }
}
