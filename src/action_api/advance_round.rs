use uuid::Uuid;

use crate::domain::entities::{Round, RoundStatus};
use crate::domain::services::initialize_round;
use crate::errors::ActionError;
use crate::events::Event;
use crate::Core;

use super::common::{load_active_round, load_party, load_state, now, require_playing};

pub struct AdvanceRoundInput {
    pub party_id: String,
    pub requester_user_id: String,
}

pub struct AdvanceRoundOutput {
    pub round: Round,
}

/// Deal the next round once the previous one has finished and the game has
/// not ended. Only the owner may trigger it, mirroring `start_party`.
pub async fn advance_round(
    core: &Core,
    input: AdvanceRoundInput,
) -> Result<AdvanceRoundOutput, ActionError> {
    let _guard = core.locks.lock(&input.party_id).await;

    let mut party = load_party(core, &input.party_id).await?;
    require_playing(&party)?;
    if party.owner_id != input.requester_user_id {
        return Err(ActionError::Unauthorized(
            "only the owner can advance the round".into(),
        ));
    }

    let previous_round = load_active_round(core, &input.party_id).await?;
    if previous_round.status != RoundStatus::Finished {
        return Err(ActionError::WrongState(
            "the current round has not finished yet".into(),
        ));
    }
    let previous_state = load_state(core, &previous_round.id).await?;

    let active_seats = previous_state.active_seats();
    let starting_player = previous_state.next_active_seat_after(previous_state.starting_player);
    let is_golden_score = active_seats.len() == 2;

    let round_id = Uuid::new_v4().to_string();
    let round_number = previous_round.round_number + 1;
    let round = Round::new(round_id.clone(), party.id.clone(), round_number, starting_player);

    let mut seed_bytes = [0u8; 8];
    rand::Rng::fill(&mut rand::thread_rng(), &mut seed_bytes);
    let mut rng = crate::domain::services::seed_rng(u64::from_le_bytes(seed_bytes));

    let scores: Vec<u16> = (0..previous_state.player_count)
        .map(|s| previous_state.score(s))
        .collect();

    let state = initialize_round(
        previous_state.player_count,
        round_number,
        starting_player,
        &scores,
        previous_state.eliminated_mask,
        party.settings.hand_size,
        is_golden_score,
        &mut rng,
    );

    core.parties.save_game_state(&round_id, state).await?;
    let round = core.parties.save_round(round).await?;

    party.current_round_id = Some(round_id.clone());
    party.touch();
    core.parties.update_party(party.clone()).await?;

    core.events.publish(Event::RoundStarted {
        party_id: party.id.clone(),
        round_id,
        timestamp: now(),
    });
    core.events.publish(Event::PartyUpdated {
        party_id: party.id,
        timestamp: now(),
    });

    Ok(AdvanceRoundOutput { round })
}
