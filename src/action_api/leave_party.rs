use crate::domain::entities::PartyStatus;
use crate::domain::value_objects::RoundPhase;
use crate::errors::ActionError;
use crate::events::Event;
use crate::Core;

use super::common::{finish_round, load_active_round, load_party, load_state, now, seat_of};

pub struct LeavePartyInput {
    pub party_id: String,
    pub user_id: String,
}

/// Remove `user_id` from a party. During `waiting` this frees the seat and
/// compacts the remaining indices (`InMemoryPartyRepository::remove_player`).
/// During `playing` the seat cannot be freed without invalidating every other
/// seat's index into `GameState`, so the caller is eliminated in place
/// instead: its hand is discarded into the played-history bucket and, if it
/// was this seat's turn, play advances to the next active seat.
pub async fn leave_party(core: &Core, input: LeavePartyInput) -> Result<(), ActionError> {
    let _guard = core.locks.lock(&input.party_id).await;

    let mut party = load_party(core, &input.party_id).await?;

    match party.status {
        PartyStatus::Waiting => {
            core.parties
                .remove_player(&input.party_id, &input.user_id)
                .await?;

            if party.owner_id == input.user_id {
                let remaining = core.parties.list_players(&input.party_id).await?;
                if remaining.is_empty() {
                    core.parties.delete_party(&input.party_id).await?;
                    core.events.publish(Event::PartyDeleted {
                        party_id: input.party_id,
                        timestamp: now(),
                    });
                    return Ok(());
                }
            }

            core.events.publish(Event::PlayerLeft {
                party_id: input.party_id,
                user_id: input.user_id,
                timestamp: now(),
            });
            Ok(())
        }
        PartyStatus::Playing => {
            let players = core.parties.list_players(&input.party_id).await?;
            let seat = seat_of(&players, &input.user_id).await?;

            let round = load_active_round(core, &input.party_id).await?;
            let mut state = load_state(core, &round.id).await?;

            let discarded: Vec<u8> = state.hand(seat).to_vec();
            state.hand_mut(seat).clear();
            state.played_history.extend(discarded);
            state.eliminate(seat);
            if state.current_turn == seat {
                state.advance_turn();
            }

            if state.active_seats().len() <= 1 {
                state.phase = RoundPhase::Finished;
                finish_round(core, party, round, state).await?;
            } else {
                core.parties.save_game_state(&round.id, state).await?;
                party.touch();
                core.parties.update_party(party.clone()).await?;
                core.events.publish(Event::PartyUpdated {
                    party_id: party.id.clone(),
                    timestamp: now(),
                });
            }

            core.events.publish(Event::PlayerLeft {
                party_id: input.party_id,
                user_id: input.user_id,
                timestamp: now(),
            });
            Ok(())
        }
        PartyStatus::Finished => Err(ActionError::WrongState(
            "party has already finished".into(),
        )),
    }
}
