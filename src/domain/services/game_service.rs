//! Round state machine: dealing, draw/play turns, ZapZap resolution,
//! elimination, and end-of-game detection.
//!
//! Mirrors the reference engine's `game_service` (`initialize_round`,
//! `execute_play`, `execute_draw`, `execute_zapzap`, `check_eliminations`,
//! `is_game_over`) but rebuilt around this crate's `GameState`/card rules and
//! the resolved open questions around reshuffle scope, the counteract
//! formula, and Golden Score.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards::{analyze_play, is_zapzap_eligible, score_round};
use crate::domain::value_objects::{ActionKind, DrawSource, GameState, LastAction, RoundPhase};
use crate::errors::ActionError;

pub const ELIMINATION_THRESHOLD: u16 = 100;

fn fresh_deck() -> Vec<u8> {
    (0u8..54).collect()
}

/// Deal a fresh round: shuffle a new deck, deal `hand_size` cards to every
/// active seat, and leave `discard_top` empty.
pub fn initialize_round(
    player_count: u8,
    round_number: u32,
    starting_player: u8,
    scores: &[u16],
    eliminated_mask: u8,
    hand_size: u8,
    is_golden_score: bool,
    rng: &mut ChaCha8Rng,
) -> GameState {
    let mut state = GameState::new(player_count, round_number, starting_player, scores);
    state.eliminated_mask = eliminated_mask;
    state.is_golden_score = is_golden_score;

    let mut deck = fresh_deck();
    deck.shuffle(rng);

    for seat in state.active_seats() {
        for _ in 0..hand_size {
            if let Some(card) = deck.pop() {
                state.hand_mut(seat).push(card);
            }
        }
    }

    state.deck = deck;
    state.current_turn = starting_player;
    state.phase = RoundPhase::Draw;
    state
}

/// Reshuffle the played-history bucket back into the deck when it runs dry.
/// Pools the entire history, not just the immediate `discard_top`, which
/// remains live and selectable after the reshuffle.
fn reshuffle_if_needed(state: &mut GameState, rng: &mut ChaCha8Rng) -> bool {
    if !state.deck.is_empty() {
        return false;
    }
    if state.played_history.is_empty() {
        return false;
    }
    let mut pool = std::mem::take(&mut state.played_history);
    pool.shuffle(rng);
    state.deck = pool;
    true
}

pub fn execute_draw(
    state: &mut GameState,
    seat: u8,
    source: DrawSource,
    discard_card_id: Option<u8>,
    rng: &mut ChaCha8Rng,
    now: i64,
) -> Result<(), ActionError> {
    if state.phase != RoundPhase::Draw {
        return Err(ActionError::WrongState(
            "round is not awaiting a draw".into(),
        ));
    }
    if state.current_turn != seat {
        return Err(ActionError::WrongState("not this seat's turn".into()));
    }

    let mut reshuffled = false;
    let card = match source {
        DrawSource::Deck => {
            reshuffled = reshuffle_if_needed(state, rng);
            state
                .deck
                .pop()
                .ok_or_else(|| ActionError::Internal("deck exhausted after reshuffle".into()))?
        }
        DrawSource::Discard => {
            let card_id = discard_card_id
                .ok_or_else(|| ActionError::InvalidInput("cardId is required for a discard draw".into()))?;
            let idx = state
                .discard_top
                .iter()
                .position(|&c| c == card_id)
                .ok_or_else(|| ActionError::InvalidInput("card is not in the discard".into()))?;
            let taken = state.discard_top.remove(idx);
            // the remainder of the pile is no longer selectable
            state.played_history.extend(state.discard_top.drain(..));
            taken
        }
    };

    state.hand_mut(seat).push(card);
    state.phase = RoundPhase::Play;
    state.last_action = Some(LastAction {
        kind: ActionKind::Draw,
        player_index: seat,
        card_ids: None,
        source: Some(source),
        card_id: Some(card),
        deck_reshuffled: Some(reshuffled),
        timestamp: now,
    });
    Ok(())
}

pub fn execute_play(
    state: &mut GameState,
    seat: u8,
    cards: &[u8],
    now: i64,
) -> Result<bool, ActionError> {
    if state.phase != RoundPhase::Play {
        return Err(ActionError::WrongState("round is not awaiting a play".into()));
    }
    if state.current_turn != seat {
        return Err(ActionError::WrongState("not this seat's turn".into()));
    }

    // cards must be a multiset-subset of the hand: each played card id is a
    // distinct physical card, so a hand holding one copy of a card cannot
    // cover a play that names that id twice.
    let mut remaining: Vec<u8> = state.hand(seat).to_vec();
    for &card in cards {
        match remaining.iter().position(|&c| c == card) {
            Some(idx) => {
                remaining.swap_remove(idx);
            }
            None => {
                return Err(ActionError::RuleViolation(
                    "played card is not in hand".into(),
                ));
            }
        }
    }
    analyze_play(cards).map_err(|reason| ActionError::RuleViolation(reason.into()))?;

    {
        let hand_mut = state.hand_mut(seat);
        hand_mut.retain(|c| !cards.contains(c));
    }

    let previous_top: Vec<u8> = state.discard_top.drain(..).collect();
    state.played_history.extend(previous_top);
    state.discard_top.extend_from_slice(cards);

    state.last_action = Some(LastAction {
        kind: ActionKind::Play,
        player_index: seat,
        card_ids: Some(cards.to_vec()),
        source: None,
        card_id: None,
        deck_reshuffled: None,
        timestamp: now,
    });

    let hand_emptied = state.hand(seat).is_empty();
    if hand_emptied {
        // an emptied hand is an automatic, always-successful ZapZap
        state.phase = RoundPhase::Finished;
        state.zapzap_caller = Some(seat);
    } else {
        state.advance_turn();
        state.phase = RoundPhase::Draw;
    }
    Ok(hand_emptied)
}

/// Result of resolving a ZapZap call: per-seat score deltas already applied
/// to `state.scores_cumulative`.
#[derive(Debug, Clone)]
pub struct ZapZapResolution {
    pub counteracted: bool,
    pub lowest_seat: u8,
}

pub fn execute_zapzap(state: &mut GameState, caller: u8, now: i64) -> Result<ZapZapResolution, ActionError> {
    if state.phase != RoundPhase::Play {
        return Err(ActionError::WrongState(
            "ZapZap can only be called during a play turn".into(),
        ));
    }
    if state.current_turn != caller {
        return Err(ActionError::WrongState("not this seat's turn".into()));
    }
    if !is_zapzap_eligible(state.hand(caller)) {
        return Err(ActionError::RuleViolation(
            "hand value exceeds the ZapZap threshold".into(),
        ));
    }

    let active = state.active_seats();
    let owned_hands: Vec<(u8, Vec<u8>)> = active
        .iter()
        .map(|&s| (s, state.hand(s).to_vec()))
        .collect();
    let hands_ref: Vec<(u8, &[u8])> = owned_hands.iter().map(|(s, h)| (*s, h.as_slice())).collect();

    let outcome = score_round(&hands_ref, caller, &active);
    for &seat in &active {
        state.add_score(seat, outcome.per_seat_delta[seat as usize]);
    }

    state.phase = RoundPhase::Finished;
    state.zapzap_caller = Some(caller);
    state.last_action = Some(LastAction {
        kind: ActionKind::ZapZap,
        player_index: caller,
        card_ids: None,
        source: None,
        card_id: None,
        deck_reshuffled: None,
        timestamp: now,
    });

    Ok(ZapZapResolution {
        counteracted: outcome.counteracted,
        lowest_seat: outcome.lowest_seat,
    })
}

/// Outcome of resolving eliminations and end-of-game status once a round
/// finishes.
#[derive(Debug, Clone)]
pub struct RoundEndOutcome {
    pub newly_eliminated: Vec<u8>,
    pub enters_golden_score: bool,
    pub game_over: bool,
    pub winner: Option<u8>,
}

/// Apply the elimination threshold (skipped while already in Golden Score),
/// then decide whether the game has ended.
///
/// Golden Score is entered when exactly two seats remain active; the round
/// played while `state.is_golden_score` is true is the one that ends the
/// game, decided by lower cumulative score rather than elimination.
pub fn resolve_round_end(state: &mut GameState) -> RoundEndOutcome {
    let mut newly_eliminated = Vec::new();
    if !state.is_golden_score {
        for seat in state.active_seats() {
            if state.score(seat) > ELIMINATION_THRESHOLD {
                state.eliminate(seat);
                newly_eliminated.push(seat);
            }
        }
    }

    let active = state.active_seats();
    if active.len() <= 1 {
        return RoundEndOutcome {
            newly_eliminated,
            enters_golden_score: false,
            game_over: true,
            winner: active.first().copied(),
        };
    }

    if state.is_golden_score {
        let lowest = active.iter().map(|&s| state.score(s)).min().unwrap();
        let tied_at_lowest = active.iter().filter(|&&s| state.score(s) == lowest).count();
        if tied_at_lowest == 1 {
            let winner = active.iter().copied().find(|&s| state.score(s) == lowest);
            return RoundEndOutcome {
                newly_eliminated,
                enters_golden_score: false,
                game_over: true,
                winner,
            };
        }
        // tie at the lowest cumulative: another Golden round until broken.
        return RoundEndOutcome {
            newly_eliminated,
            enters_golden_score: true,
            game_over: false,
            winner: None,
        };
    }

    let enters_golden_score = active.len() == 2;
    RoundEndOutcome {
        newly_eliminated,
        enters_golden_score,
        game_over: false,
        winner: None,
    }
}

/// Seed a deterministic RNG for a round. Per-party determinism is not
/// required; only the algorithm (ChaCha8) must be shared across reshuffles
/// within a round.
pub fn seed_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> ChaCha8Rng {
        seed_rng(42)
    }

    #[test]
    fn initialize_round_deals_hand_size_to_active_seats_only() {
        let mut r = rng();
        let state = initialize_round(4, 1, 0, &[0, 0, 0, 0], 0b0010, 5, false, &mut r);
        assert_eq!(state.hand(0).len(), 5);
        assert_eq!(state.hand(1).len(), 0); // eliminated, no deal
        assert_eq!(state.hand(2).len(), 5);
        assert!(state.discard_top.is_empty());
    }

    #[test]
    fn execute_play_then_draw_round_trip() {
        let mut r = rng();
        let mut state = initialize_round(3, 1, 0, &[0, 0, 0], 0, 5, false, &mut r);
        let hand0: Vec<u8> = state.hand(0).to_vec();
        // find two cards forming a valid play, else skip by drawing to pad rank match
        // force a deterministic pair: put two spades aces in hand for the test
        state.hand_mut(0).clear();
        state.hand_mut(0).extend_from_slice(&[0, 13, 1, 2, 3]); // spades A, hearts A, spades 2, spades 3, spades 4
        let emptied = execute_play(&mut state, 0, &[0, 13], 1000).unwrap();
        assert!(!emptied);
        assert_eq!(state.phase, RoundPhase::Draw);
        assert_eq!(state.current_turn, 1);
        assert_eq!(state.discard_top.as_slice(), &[0, 13]);
    }

    #[test]
    fn execute_play_emptying_hand_is_automatic_zapzap() {
        let mut r = rng();
        let mut state = initialize_round(3, 1, 0, &[0, 0, 0], 0, 5, false, &mut r);
        state.hand_mut(0).clear();
        state.hand_mut(0).extend_from_slice(&[0, 13]);
        let emptied = execute_play(&mut state, 0, &[0, 13], 1000).unwrap();
        assert!(emptied);
        assert_eq!(state.phase, RoundPhase::Finished);
        assert_eq!(state.zapzap_caller, Some(0));
    }

    #[test]
    fn resolve_round_end_enters_golden_score_at_two_seats() {
        let mut r = rng();
        let mut state = initialize_round(3, 1, 0, &[0, 200, 0], 0, 5, false, &mut r);
        state.add_score(1, 1); // push seat 1 over threshold
        let outcome = resolve_round_end(&mut state);
        assert_eq!(outcome.newly_eliminated, vec![1]);
        assert!(!outcome.game_over);
        assert!(outcome.enters_golden_score);
    }

    #[test]
    fn resolve_round_end_under_golden_score_decides_by_lower_score() {
        let mut r = rng();
        let mut state = initialize_round(2, 2, 0, &[10, 20], 0, 5, true, &mut r);
        let outcome = resolve_round_end(&mut state);
        assert!(outcome.game_over);
        assert_eq!(outcome.winner, Some(0));
    }

    #[test]
    fn resolve_round_end_under_golden_score_tie_plays_another_round() {
        let mut r = rng();
        let mut state = initialize_round(2, 2, 0, &[15, 15], 0, 5, true, &mut r);
        let outcome = resolve_round_end(&mut state);
        assert!(!outcome.game_over);
        assert!(outcome.enters_golden_score);
        assert_eq!(outcome.winner, None);
    }

    #[test]
    fn execute_play_rejects_naming_the_same_card_twice() {
        let mut r = rng();
        let mut state = initialize_round(3, 1, 0, &[0, 0, 0], 0, 5, false, &mut r);
        state.hand_mut(0).clear();
        state.hand_mut(0).extend_from_slice(&[0, 13, 1, 2, 3]);
        let err = execute_play(&mut state, 0, &[0, 0], 1000).unwrap_err();
        assert!(matches!(err, ActionError::RuleViolation(_)));
        // the hand must be untouched after a rejected play
        assert_eq!(state.hand(0).len(), 5);
    }
}
