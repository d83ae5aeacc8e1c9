use crate::domain::services::execute_play;
use crate::errors::ActionError;
use crate::events::Event;
use crate::Core;

use super::common::{
    finish_round, load_active_round, load_party, load_state, now, require_playing, seat_of,
};

pub struct PlayCardsInput {
    pub party_id: String,
    pub user_id: String,
    pub card_ids: Vec<u8>,
}

pub struct PlayCardsOutput {
    /// True when the play emptied the seat's hand, triggering an automatic,
    /// always-successful ZapZap that ended the round.
    pub round_ended: bool,
}

pub async fn play_cards(core: &Core, input: PlayCardsInput) -> Result<PlayCardsOutput, ActionError> {
    let _guard = core.locks.lock(&input.party_id).await;

    let party = load_party(core, &input.party_id).await?;
    require_playing(&party)?;
    let round = load_active_round(core, &input.party_id).await?;
    let mut state = load_state(core, &round.id).await?;

    let players = core.parties.list_players(&input.party_id).await?;
    let seat = seat_of(&players, &input.user_id).await?;

    let round_ended = execute_play(&mut state, seat, &input.card_ids, now())?;

    if round_ended {
        finish_round(core, party, round, state).await?;
    } else {
        core.parties.save_game_state(&round.id, state).await?;
        core.events.publish(Event::StateChanged {
            party_id: input.party_id,
            timestamp: now(),
        });
    }

    Ok(PlayCardsOutput { round_ended })
}
