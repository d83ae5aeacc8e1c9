use crate::domain::entities::{PartyPlayer, PartyStatus};
use crate::errors::ActionError;
use crate::events::Event;
use crate::Core;

use super::common::{load_party, now};

pub struct JoinPartyInput {
    pub party_id: String,
    pub user_id: String,
}

pub struct JoinPartyOutput {
    pub player_index: u8,
    pub already_joined: bool,
}

/// Seat `user_id` in the party. Idempotent: calling it again for a user
/// already seated returns the existing seat instead of erroring or adding a
/// duplicate.
pub async fn join_party(
    core: &Core,
    input: JoinPartyInput,
) -> Result<JoinPartyOutput, ActionError> {
    let _guard = core.locks.lock(&input.party_id).await;

    let party = load_party(core, &input.party_id).await?;
    if party.status != PartyStatus::Waiting {
        return Err(ActionError::WrongState(
            "party is no longer accepting players".into(),
        ));
    }

    let mut players = core.parties.list_players(&input.party_id).await?;
    if let Some(existing) = players.iter().find(|p| p.user_id == input.user_id) {
        return Ok(JoinPartyOutput {
            player_index: existing.player_index,
            already_joined: true,
        });
    }

    if party.is_full(players.len()) {
        return Err(ActionError::Conflict("party is full".into()));
    }

    let taken: std::collections::HashSet<u8> = players.iter().map(|p| p.player_index).collect();
    let player_index = (0..party.settings.player_count)
        .find(|i| !taken.contains(i))
        .ok_or_else(|| ActionError::Conflict("no free seat".into()))?;

    let player = PartyPlayer::new(input.party_id.clone(), input.user_id.clone(), player_index);
    core.parties.upsert_player(player).await?;
    players.push(PartyPlayer::new(
        input.party_id.clone(),
        input.user_id.clone(),
        player_index,
    ));

    core.events.publish(Event::PlayerJoined {
        party_id: input.party_id,
        user_id: input.user_id,
        timestamp: now(),
    });

    Ok(JoinPartyOutput {
        player_index,
        already_joined: false,
    })
}
