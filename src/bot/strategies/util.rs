use rand::seq::SliceRandom;

use crate::domain::cards::analyze_play;

/// Find any two-card combination in `hand` that is a legal play, trying
/// pairs in random order. Not exhaustive over sequences; good enough for a
/// reference strategy that doesn't need to find the best play, only a legal one.
pub(crate) fn find_any_legal_play(hand: &[u8]) -> Option<Vec<u8>> {
    let mut candidates: Vec<u8> = hand.to_vec();
    candidates.shuffle(&mut rand::thread_rng());
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let pair = vec![candidates[i], candidates[j]];
            if analyze_play(&pair).is_ok() {
                return Some(pair);
            }
        }
    }
    None
}
