//! Card identity and play-legality rules.
//!
//! Cards are represented as `u8` ids 0..=53: 0-12 Spades, 13-25 Hearts,
//! 26-38 Clubs, 39-51 Diamonds, 52-53 Jokers. Rank and suit are derived by
//! arithmetic rather than stored, the same encoding the reference engine's
//! card analyzer uses.

use smallvec::SmallVec;

use super::value_objects::ZapZapOutcome;

pub const JOKER_LOW: u8 = 52;
pub const JOKER_HIGH: u8 = 53;

/// Point-value mode: a card's contribution to ZapZap eligibility differs
/// from its contribution to a penalty payout (joker is 0 vs 25).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    Eligibility,
    Penalty,
}

/// A legal combination shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayKind {
    Single,
    Pair,
    Sequence,
}

#[inline]
pub fn is_joker(card: u8) -> bool {
    card >= JOKER_LOW
}

#[inline]
pub fn suit(card: u8) -> u8 {
    card / 13
}

#[inline]
pub fn rank(card: u8) -> u8 {
    card % 13
}

/// Point value of a single card under the given mode. Ace = 1, 2..10 face,
/// J = 11, Q = 12, K = 13; Joker is 0 for eligibility and 25 for penalty.
pub fn card_value(card: u8, mode: ValueMode) -> u16 {
    if is_joker(card) {
        return match mode {
            ValueMode::Eligibility => 0,
            ValueMode::Penalty => 25,
        };
    }
    rank(card) as u16 + 1
}

/// Sum of card values in a hand under the given mode.
pub fn hand_value(hand: &[u8], mode: ValueMode) -> u16 {
    hand.iter().map(|&c| card_value(c, mode)).sum()
}

/// A hand may call ZapZap when its eligibility-mode value is 5 or lower.
pub fn is_zapzap_eligible(hand: &[u8]) -> bool {
    hand_value(hand, ValueMode::Eligibility) <= 5
}

/// Validate that `cards` form a legal same-rank group (2 or more cards of
/// the same rank; jokers substitute for any rank).
pub fn is_valid_same_rank(cards: &[u8]) -> bool {
    if cards.len() < 2 {
        return false;
    }
    let anchor_rank = cards.iter().find(|&&c| !is_joker(c)).map(|&c| rank(c));
    match anchor_rank {
        None => true, // all jokers
        Some(r) => cards.iter().all(|&c| is_joker(c) || rank(c) == r),
    }
}

/// Validate a same-suit consecutive sequence (3 or more cards, ace low, no
/// wraparound; jokers fill gaps), returning the specific reason it fails.
fn sequence_reason(cards: &[u8]) -> Result<(), &'static str> {
    if cards.len() < 3 {
        return Err("not enough cards for pair/sequence");
    }
    let anchor_suit = cards.iter().find(|&&c| !is_joker(c)).map(|&c| suit(c));
    if let Some(target_suit) = anchor_suit {
        if !cards.iter().all(|&c| is_joker(c) || suit(c) == target_suit) {
            return Err("mixed suits");
        }
    }

    let mut known_ranks: SmallVec<[u8; 16]> = cards
        .iter()
        .filter(|&&c| !is_joker(c))
        .map(|&c| rank(c))
        .collect();
    known_ranks.sort_unstable();
    if known_ranks.windows(2).any(|w| w[0] == w[1]) {
        return Err("duplicate rank");
    }
    if known_ranks.is_empty() {
        return Ok(()); // all jokers: trivially fillable
    }
    let jokers = cards.iter().filter(|&&c| is_joker(c)).count();
    let span = known_ranks.last().unwrap() - known_ranks.first().unwrap() + 1;
    if span as usize > known_ranks.len() + jokers {
        return Err("cards not consecutive");
    }
    Ok(())
}

/// Validate that `cards` form a legal same-suit consecutive sequence.
pub fn is_valid_sequence(cards: &[u8]) -> bool {
    sequence_reason(cards).is_ok()
}

/// Validate an arbitrary play, returning the recognized kind or the reason
/// the combination is illegal. A single card is always valid; two or more
/// must form either a same-rank group (`pair`) or a same-suit consecutive
/// run (`sequence`).
pub fn analyze_play(cards: &[u8]) -> Result<PlayKind, &'static str> {
    if cards.iter().any(|&c| c > JOKER_HIGH) {
        return Err("invalid card id");
    }
    match cards.len() {
        0 => Err("not enough cards for pair/sequence"),
        1 => Ok(PlayKind::Single),
        _ => {
            if is_valid_same_rank(cards) {
                Ok(PlayKind::Pair)
            } else {
                sequence_reason(cards).map(|()| PlayKind::Sequence)
            }
        }
    }
}

/// Compute the score delta for every active seat after a ZapZap call.
///
/// Every seat tied at the lowest penalty value receives delta 0; every other
/// seat receives its own penalty value. If some seat other than the caller
/// has a penalty value at or below the caller's, the call is counteracted:
/// the caller's delta is overwritten with
/// `penaltyValue(caller) + (activeSeatCount - 1) * 5`, even though it may
/// have been tied for lowest (and so would otherwise have scored 0).
pub fn score_round(hands: &[(u8, &[u8])], caller: u8, active_seats: &[u8]) -> ZapZapOutcome {
    let mut per_seat_delta = vec![0u16; super::value_objects::MAX_PLAYERS];

    let penalty_of = |seat: u8| -> u16 {
        hands
            .iter()
            .find(|(s, _)| *s == seat)
            .map(|(_, h)| hand_value(h, ValueMode::Penalty))
            .unwrap_or(0)
    };

    let caller_penalty = penalty_of(caller);
    let lowest_value = active_seats
        .iter()
        .map(|&s| penalty_of(s))
        .min()
        .unwrap_or(0);
    let lowest_seat = active_seats
        .iter()
        .copied()
        .find(|&s| penalty_of(s) == lowest_value)
        .unwrap_or(caller);

    let counteracted = active_seats
        .iter()
        .any(|&s| s != caller && penalty_of(s) <= caller_penalty);
    let active_seat_count = active_seats.len() as u16;

    for &seat in active_seats {
        let penalty = penalty_of(seat);
        per_seat_delta[seat as usize] = if penalty == lowest_value { 0 } else { penalty };
    }
    if counteracted {
        per_seat_delta[caller as usize] =
            caller_penalty + active_seat_count.saturating_sub(1) * 5;
    }

    ZapZapOutcome {
        per_seat_delta,
        counteracted,
        lowest_seat,
    }
}
