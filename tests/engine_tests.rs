//! Engine-level tests exercising the domain layer directly, without going
//! through the action api. Covers the card-identity and round-lifecycle
//! invariants that a unit test inside `domain::services` wouldn't have room
//! to set up end to end.

use zapzap_engine::domain::cards::{hand_value, is_zapzap_eligible, score_round, ValueMode};
use zapzap_engine::domain::services::{
    execute_draw, execute_play, execute_zapzap, initialize_round, resolve_round_end, seed_rng,
};
use zapzap_engine::domain::value_objects::{DrawSource, RoundPhase};

#[test]
fn every_card_id_is_dealt_exactly_once() {
    let mut rng = seed_rng(7);
    let state = initialize_round(4, 1, 0, &[0, 0, 0, 0], 0, 5, false, &mut rng);

    let mut seen = vec![false; 54];
    for &card in &state.deck {
        assert!(!seen[card as usize], "duplicate card {card}");
        seen[card as usize] = true;
    }
    for &card in &state.discard_top {
        assert!(!seen[card as usize], "duplicate card {card}");
        seen[card as usize] = true;
    }
    for seat in 0..4 {
        for &card in state.hand(seat) {
            assert!(!seen[card as usize], "duplicate card {card}");
            seen[card as usize] = true;
        }
    }
    assert!(seen.iter().all(|&s| s), "not every card was dealt");
}

#[test]
fn draw_from_deck_then_play_advances_turn() {
    let mut rng = seed_rng(11);
    let mut state = initialize_round(3, 1, 0, &[0, 0, 0], 0, 5, false, &mut rng);

    execute_draw(&mut state, 0, DrawSource::Deck, None, &mut rng, 1).unwrap();
    assert_eq!(state.phase, RoundPhase::Play);
    assert_eq!(state.hand(0).len(), 6);

    // force a deterministic legal pair onto seat 0's hand
    state.hand_mut(0).clear();
    state.hand_mut(0).extend_from_slice(&[5, 18, 1, 2, 3, 4]); // spades 6, hearts 6, + filler
    execute_play(&mut state, 0, &[5, 18], 2).unwrap();
    assert_eq!(state.phase, RoundPhase::Draw);
    assert_eq!(state.current_turn, 1);
    assert_eq!(state.hand(0).len(), 4);
}

#[test]
fn draw_from_discard_buries_the_remainder() {
    let mut rng = seed_rng(3);
    let mut state = initialize_round(3, 1, 0, &[0, 0, 0], 0, 5, false, &mut rng);
    state.discard_top.clear();
    state.discard_top.extend_from_slice(&[0, 1, 2]);

    execute_draw(&mut state, 0, DrawSource::Discard, Some(1), &mut rng, 5).unwrap();
    assert!(state.hand(0).contains(&1));
    assert!(state.discard_top.is_empty());
    assert_eq!(state.played_history, vec![0, 2]);
}

#[test]
fn reshuffle_pools_the_whole_played_history() {
    let mut rng = seed_rng(99);
    let mut state = initialize_round(3, 1, 0, &[0, 0, 0], 0, 5, false, &mut rng);
    state.deck.clear();
    state.played_history = vec![0, 1, 2, 3, 4];

    execute_draw(&mut state, 0, DrawSource::Deck, None, &mut rng, 9).unwrap();
    assert!(state.played_history.is_empty());
    // 5 cards went into the deck, one was drawn, 4 remain
    assert_eq!(state.deck.len(), 4);
    let last_action = state.last_action.unwrap();
    assert_eq!(last_action.deck_reshuffled, Some(true));
}

#[test]
fn zapzap_eligibility_matches_hand_value_threshold() {
    let low_hand = [0u8, 13u8]; // ace + ace = 2
    let high_hand = [11u8, 12u8]; // queen + king = 12 + 13 = 25
    assert!(is_zapzap_eligible(&low_hand));
    assert!(!is_zapzap_eligible(&high_hand));
    assert_eq!(hand_value(&low_hand, ValueMode::Eligibility), 2);
}

#[test]
fn execute_zapzap_applies_scores_and_finishes_round() {
    let mut rng = seed_rng(21);
    let mut state = initialize_round(3, 1, 0, &[10, 10, 10], 0, 5, false, &mut rng);
    state.hand_mut(0).clear();
    state.hand_mut(0).extend_from_slice(&[0]); // ace, value 1
    state.hand_mut(1).clear();
    state.hand_mut(1).extend_from_slice(&[12, 25]); // king + king = 13 + 13 = 26
    state.phase = RoundPhase::Play;
    state.current_turn = 0;

    let resolution = execute_zapzap(&mut state, 0, 30).unwrap();
    assert!(!resolution.counteracted);
    assert_eq!(state.score(0), 10);
    assert_eq!(state.score(1), 36);
    assert_eq!(state.phase, RoundPhase::Finished);
}

#[test]
fn resolve_round_end_eliminates_over_threshold_and_ends_game_at_one_seat() {
    let mut rng = seed_rng(1);
    let mut state = initialize_round(3, 1, 0, &[0, 150, 150], 0, 5, false, &mut rng);
    let outcome = resolve_round_end(&mut state);
    assert_eq!(outcome.newly_eliminated.len(), 2);
    assert!(outcome.game_over);
    assert_eq!(outcome.winner, Some(0));
}

#[test]
fn score_round_counteract_matches_resolved_formula() {
    let caller_hand = [0u8]; // value 1
    let tying_hand = [13u8]; // value 1, ties the caller
    let hands: Vec<(u8, &[u8])> = vec![(0, &caller_hand), (1, &tying_hand)];
    let outcome = score_round(&hands, 0, &[0, 1]);
    assert!(outcome.counteracted);
    // caller_penalty (1) + (activeSeatCount - 1) * 5 == 1 + 5 == 6
    assert_eq!(outcome.per_seat_delta[0], 6);
}
