use uuid::Uuid;

use crate::domain::entities::{PartyStatus, Round};
use crate::domain::services::initialize_round;
use crate::errors::ActionError;
use crate::events::Event;
use crate::Core;

use super::common::{load_party, now};

pub struct StartPartyInput {
    pub party_id: String,
    pub requester_user_id: String,
}

pub struct StartPartyOutput {
    pub round: Round,
}

/// Deal round 1 and flip the party to `playing`. Only the owner may start.
pub async fn start_party(
    core: &Core,
    input: StartPartyInput,
) -> Result<StartPartyOutput, ActionError> {
    let _guard = core.locks.lock(&input.party_id).await;

    let mut party = load_party(core, &input.party_id).await?;
    if party.owner_id != input.requester_user_id {
        return Err(ActionError::Unauthorized(
            "only the owner can start the party".into(),
        ));
    }

    let players = core.parties.list_players(&input.party_id).await?;
    if !party.can_start(players.len()) {
        return Err(ActionError::WrongState(
            "party does not have enough players to start".into(),
        ));
    }

    // every seated user, reserved bot seats included, must still resolve
    for player in &players {
        if core.users.get_user(&player.user_id).await?.is_none() {
            return Err(ActionError::NotFound(format!(
                "bot {} not found",
                player.user_id
            )));
        }
    }

    let round_id = Uuid::new_v4().to_string();
    let starting_player = 0u8;
    let round = Round::new(round_id.clone(), party.id.clone(), 1, starting_player);

    let mut seed_bytes = [0u8; 8];
    rand::Rng::fill(&mut rand::thread_rng(), &mut seed_bytes);
    let mut rng = crate::domain::services::seed_rng(u64::from_le_bytes(seed_bytes));

    // Seat count is the number of players actually seated, not the party's
    // capacity — `can_start` permits starting short of `player_count`, and a
    // GameState sized to the capacity would deal hands and a turn cursor to
    // phantom seats nobody occupies.
    let seat_count = players.len() as u8;
    let scores = vec![0u16; seat_count as usize];
    let state = initialize_round(
        seat_count,
        1,
        starting_player,
        &scores,
        0,
        party.settings.hand_size,
        false,
        &mut rng,
    );

    core.parties.save_game_state(&round_id, state).await?;
    let round = core.parties.save_round(round).await?;

    party.status = PartyStatus::Playing;
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

    Ok(StartPartyOutput { round })
}
