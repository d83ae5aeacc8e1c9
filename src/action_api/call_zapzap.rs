use crate::domain::services::execute_zapzap;
use crate::errors::ActionError;
use crate::Core;

use super::common::{finish_round, load_active_round, load_party, load_state, now, require_playing, seat_of};

pub struct CallZapZapInput {
    pub party_id: String,
    pub user_id: String,
}

pub struct CallZapZapOutput {
    pub counteracted: bool,
}

pub async fn call_zapzap(
    core: &Core,
    input: CallZapZapInput,
) -> Result<CallZapZapOutput, ActionError> {
    let _guard = core.locks.lock(&input.party_id).await;

    let party = load_party(core, &input.party_id).await?;
    require_playing(&party)?;
    let round = load_active_round(core, &input.party_id).await?;
    let mut state = load_state(core, &round.id).await?;

    let players = core.parties.list_players(&input.party_id).await?;
    let seat = seat_of(&players, &input.user_id).await?;

    let resolution = execute_zapzap(&mut state, seat, now())?;
    finish_round(core, party, round, state).await?;

    Ok(CallZapZapOutput {
        counteracted: resolution.counteracted,
    })
}
