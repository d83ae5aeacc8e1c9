use uuid::Uuid;

use crate::domain::entities::{generate_invite_code, Party, PartyPlayer, PartyVisibility};
use crate::domain::value_objects::PartySettings;
use crate::errors::ActionError;
use crate::events::Event;
use crate::Core;

use super::common::now;

pub struct CreatePartyInput {
    pub owner_user_id: String,
    pub name: String,
    pub visibility: PartyVisibility,
    pub settings: PartySettings,
    /// User ids of bots to pre-reserve seats for, seated right after the
    /// owner. Each must resolve to a bot user in the user repository.
    pub bot_seat_ids: Option<Vec<String>>,
}

pub struct CreatePartyOutput {
    pub party: Party,
}

/// Create a party and seat its owner at index 0, followed by any reserved
/// bot seats.
pub async fn create_party(
    core: &Core,
    input: CreatePartyInput,
) -> Result<CreatePartyOutput, ActionError> {
    input
        .settings
        .validate()
        .map_err(|e| ActionError::InvalidInput(e.into()))?;

    let bot_seat_ids = input.bot_seat_ids.unwrap_or_default();
    if 1 + bot_seat_ids.len() > input.settings.player_count as usize {
        return Err(ActionError::InvalidInput(
            "reserved bot seats exceed the party's player count".into(),
        ));
    }
    for bot_user_id in &bot_seat_ids {
        let bot = core
            .users
            .get_user(bot_user_id)
            .await?
            .ok_or_else(|| ActionError::NotFound(format!("bot {bot_user_id} not found")))?;
        if !bot.is_bot() {
            return Err(ActionError::InvalidInput(format!(
                "{bot_user_id} is not a bot user"
            )));
        }
    }

    let party_id = Uuid::new_v4().to_string();
    let invite_code = generate_invite_code();

    let _guard = core.locks.lock(&party_id).await;

    let party = Party::new(
        party_id.clone(),
        input.name,
        input.owner_user_id.clone(),
        invite_code,
        input.visibility,
        input.settings,
    );
    let party = core.parties.create_party(party).await?;
    core.parties
        .upsert_player(PartyPlayer::new(party_id.clone(), input.owner_user_id, 0))
        .await?;

    for (offset, bot_user_id) in bot_seat_ids.into_iter().enumerate() {
        let seat = 1 + offset as u8;
        core.parties
            .upsert_player(PartyPlayer::new(party_id.clone(), bot_user_id, seat))
            .await?;
    }

    core.events.publish(Event::PartyCreated {
        party_id: party.id.clone(),
        timestamp: now(),
    });

    Ok(CreatePartyOutput { party })
}
