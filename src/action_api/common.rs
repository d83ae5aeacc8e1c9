use crate::domain::entities::{Party, PartyPlayer, PartyStatus, Round};
use crate::domain::services::resolve_round_end;
use crate::domain::value_objects::GameState;
use crate::errors::ActionError;
use crate::events::Event;
use crate::Core;

pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub(crate) async fn load_party(core: &Core, party_id: &str) -> Result<Party, ActionError> {
    core.parties
        .get_party(party_id)
        .await?
        .ok_or_else(|| ActionError::NotFound(format!("party {party_id} not found")))
}

pub(crate) async fn seat_of(
    players: &[PartyPlayer],
    user_id: &str,
) -> Result<u8, ActionError> {
    players
        .iter()
        .find(|p| p.user_id == user_id)
        .map(|p| p.player_index)
        .ok_or_else(|| ActionError::Unauthorized(format!("{user_id} is not seated in this party")))
}

pub(crate) async fn load_active_round(core: &Core, party_id: &str) -> Result<Round, ActionError> {
    core.parties
        .get_active_round(party_id)
        .await?
        .ok_or_else(|| ActionError::WrongState("party has no active round".into()))
}

pub(crate) async fn load_state(core: &Core, round_id: &str) -> Result<GameState, ActionError> {
    core.parties
        .get_game_state(round_id)
        .await?
        .ok_or_else(|| ActionError::Internal(format!("missing game state for round {round_id}")))
}

pub(crate) fn require_playing(party: &Party) -> Result<(), ActionError> {
    if party.status != PartyStatus::Playing {
        return Err(ActionError::WrongState("party is not in play".into()));
    }
    Ok(())
}

/// Persist a round that just transitioned to `Finished`, resolve
/// eliminations/Golden Score/game-over, and publish the matching events.
/// Shared by the two operations that can end a round: an emptied-hand
/// automatic ZapZap (`play_cards`) and an explicit `call_zapzap`.
pub(crate) async fn finish_round(
    core: &Core,
    mut party: Party,
    mut round: Round,
    mut state: GameState,
) -> Result<(), ActionError> {
    let outcome = resolve_round_end(&mut state);
    round.finish();
    core.parties.save_game_state(&round.id, state).await?;
    core.parties.save_round(round.clone()).await?;

    core.events.publish(Event::RoundEnded {
        party_id: party.id.clone(),
        round_id: round.id.clone(),
        timestamp: now(),
    });

    if outcome.game_over {
        let winner_user_id = if let Some(seat) = outcome.winner {
            core.parties
                .list_players(&party.id)
                .await?
                .into_iter()
                .find(|p| p.player_index == seat)
                .map(|p| p.user_id)
        } else {
            None
        };
        party.status = PartyStatus::Finished;
        party.touch();
        core.parties.update_party(party.clone()).await?;
        core.events.publish(Event::GameEnded {
            party_id: party.id.clone(),
            winner_user_id,
            timestamp: now(),
        });
    } else {
        party.touch();
        core.parties.update_party(party.clone()).await?;
        core.events.publish(Event::PartyUpdated {
            party_id: party.id,
            timestamp: now(),
        });
    }

    Ok(())
}
