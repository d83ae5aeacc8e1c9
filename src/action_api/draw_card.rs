use crate::domain::services::{execute_draw, seed_rng};
use crate::domain::value_objects::DrawSource;
use crate::errors::ActionError;
use crate::events::Event;
use crate::Core;

use super::common::{load_active_round, load_party, load_state, now, require_playing, seat_of};

pub struct DrawCardInput {
    pub party_id: String,
    pub user_id: String,
    pub source: DrawSource,
    /// Required when `source` is `DrawSource::Discard`.
    pub discard_card_id: Option<u8>,
}

pub async fn draw_card(core: &Core, input: DrawCardInput) -> Result<(), ActionError> {
    let _guard = core.locks.lock(&input.party_id).await;

    let party = load_party(core, &input.party_id).await?;
    require_playing(&party)?;
    let round = load_active_round(core, &input.party_id).await?;
    let mut state = load_state(core, &round.id).await?;

    let players = core.parties.list_players(&input.party_id).await?;
    let seat = seat_of(&players, &input.user_id).await?;

    let mut rng = seed_rng(rand::random::<u64>());
    execute_draw(
        &mut state,
        seat,
        input.source,
        input.discard_card_id,
        &mut rng,
        now(),
    )?;

    core.parties.save_game_state(&round.id, state).await?;
    core.events.publish(Event::StateChanged {
        party_id: input.party_id,
        timestamp: now(),
    });
    Ok(())
}
