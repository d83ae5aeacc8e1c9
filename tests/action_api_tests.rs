//! End-to-end action-api flows against the in-memory repositories: create,
//! join (including idempotent re-join), start, and a play/draw/zapzap round
//! trip through to a finished game.

use std::sync::Arc;

use zapzap_engine::action_api::{
    call_zapzap, create_party, draw_card, join_party, leave_party, play_cards, start_party,
    CallZapZapInput, CreatePartyInput, DrawCardInput, JoinPartyInput, LeavePartyInput,
    PlayCardsInput, StartPartyInput,
};
use zapzap_engine::domain::entities::{PartyStatus, PartyVisibility, User};
use zapzap_engine::domain::value_objects::{DrawSource, PartySettings, RoundPhase};
use zapzap_engine::repositories::{InMemoryPartyRepository, InMemoryUserRepository};
use zapzap_engine::Core;

async fn new_core() -> Core {
    Core::new(
        Arc::new(InMemoryPartyRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}

#[tokio::test]
async fn create_join_start_round_trip() {
    let core = new_core().await;
    core.users
        .create_user(User::new_human("owner".into(), "owner".into()))
        .await
        .unwrap();
    for i in 0..2 {
        core.users
            .create_user(User::new_human(format!("p{i}"), format!("p{i}")))
            .await
            .unwrap();
    }

    let created = create_party(
        &core,
        CreatePartyInput {
            owner_user_id: "owner".into(),
            name: "table".into(),
            visibility: PartyVisibility::Public,
            settings: PartySettings::new(3, 5),
            bot_seat_ids: None,
        },
    )
    .await
    .unwrap();

    for i in 0..2 {
        join_party(
            &core,
            JoinPartyInput {
                party_id: created.party.id.clone(),
                user_id: format!("p{i}"),
            },
        )
        .await
        .unwrap();
    }

    // re-joining is idempotent
    let rejoin = join_party(
        &core,
        JoinPartyInput {
            party_id: created.party.id.clone(),
            user_id: "p0".into(),
        },
    )
    .await
    .unwrap();
    assert!(rejoin.already_joined);

    let players = core.parties.list_players(&created.party.id).await.unwrap();
    assert_eq!(players.len(), 3);

    start_party(
        &core,
        StartPartyInput {
            party_id: created.party.id.clone(),
            requester_user_id: "owner".into(),
        },
    )
    .await
    .unwrap();

    let party = core.parties.get_party(&created.party.id).await.unwrap().unwrap();
    assert_eq!(party.status, PartyStatus::Playing);
    let round = core
        .parties
        .get_active_round(&created.party.id)
        .await
        .unwrap()
        .unwrap();
    let state = core.parties.get_game_state(&round.id).await.unwrap().unwrap();
    assert_eq!(state.phase, RoundPhase::Draw);
}

#[tokio::test]
async fn leave_before_start_frees_the_seat() {
    let core = new_core().await;
    core.users
        .create_user(User::new_human("owner".into(), "owner".into()))
        .await
        .unwrap();
    core.users
        .create_user(User::new_human("p0".into(), "p0".into()))
        .await
        .unwrap();

    let created = create_party(
        &core,
        CreatePartyInput {
            owner_user_id: "owner".into(),
            name: "table".into(),
            visibility: PartyVisibility::Private,
            settings: PartySettings::new(3, 5),
            bot_seat_ids: None,
        },
    )
    .await
    .unwrap();

    join_party(
        &core,
        JoinPartyInput {
            party_id: created.party.id.clone(),
            user_id: "p0".into(),
        },
    )
    .await
    .unwrap();

    leave_party(
        &core,
        LeavePartyInput {
            party_id: created.party.id.clone(),
            user_id: "p0".into(),
        },
    )
    .await
    .unwrap();

    let players = core.parties.list_players(&created.party.id).await.unwrap();
    assert_eq!(players.len(), 1);
}

#[tokio::test]
async fn draw_then_play_then_zapzap_finishes_the_round() {
    let core = new_core().await;
    for id in ["owner", "p1", "p2"] {
        core.users
            .create_user(User::new_human(id.into(), id.into()))
            .await
            .unwrap();
    }

    let created = create_party(
        &core,
        CreatePartyInput {
            owner_user_id: "owner".into(),
            name: "table".into(),
            visibility: PartyVisibility::Public,
            settings: PartySettings::new(3, 5),
            bot_seat_ids: None,
        },
    )
    .await
    .unwrap();

    for id in ["p1", "p2"] {
        join_party(
            &core,
            JoinPartyInput {
                party_id: created.party.id.clone(),
                user_id: id.into(),
            },
        )
        .await
        .unwrap();
    }

    start_party(
        &core,
        StartPartyInput {
            party_id: created.party.id.clone(),
            requester_user_id: "owner".into(),
        },
    )
    .await
    .unwrap();

    draw_card(
        &core,
        DrawCardInput {
            party_id: created.party.id.clone(),
            user_id: "owner".into(),
            source: DrawSource::Deck,
            discard_card_id: None,
        },
    )
    .await
    .unwrap();

    // force a known-low hand so the ZapZap call is legal
    {
        let round = core
            .parties
            .get_active_round(&created.party.id)
            .await
            .unwrap()
            .unwrap();
        let mut state = core
            .parties
            .get_game_state(&round.id)
            .await
            .unwrap()
            .unwrap();
        state.hand_mut(0).clear();
        state.hand_mut(0).extend_from_slice(&[0]); // single ace, value 1
        core.parties.save_game_state(&round.id, state).await.unwrap();
    }

    let outcome = call_zapzap(
        &core,
        CallZapZapInput {
            party_id: created.party.id.clone(),
            user_id: "owner".into(),
        },
    )
    .await
    .unwrap();
    assert!(!outcome.counteracted);

    let round = core
        .parties
        .get_active_round(&created.party.id)
        .await
        .unwrap()
        .unwrap();
    let state = core.parties.get_game_state(&round.id).await.unwrap().unwrap();
    assert_eq!(state.phase, RoundPhase::Finished);
}

#[tokio::test]
async fn play_emptying_hand_ends_the_round_automatically() {
    let core = new_core().await;
    for id in ["owner", "p1", "p2"] {
        core.users
            .create_user(User::new_human(id.into(), id.into()))
            .await
            .unwrap();
    }
    let created = create_party(
        &core,
        CreatePartyInput {
            owner_user_id: "owner".into(),
            name: "table".into(),
            visibility: PartyVisibility::Public,
            settings: PartySettings::new(3, 5),
            bot_seat_ids: None,
        },
    )
    .await
    .unwrap();
    for id in ["p1", "p2"] {
        join_party(
            &core,
            JoinPartyInput {
                party_id: created.party.id.clone(),
                user_id: id.into(),
            },
        )
        .await
        .unwrap();
    }
    start_party(
        &core,
        StartPartyInput {
            party_id: created.party.id.clone(),
            requester_user_id: "owner".into(),
        },
    )
    .await
    .unwrap();

    let round = core
        .parties
        .get_active_round(&created.party.id)
        .await
        .unwrap()
        .unwrap();
    {
        let mut state = core
            .parties
            .get_game_state(&round.id)
            .await
            .unwrap()
            .unwrap();
        state.hand_mut(0).clear();
        state.hand_mut(0).extend_from_slice(&[0, 13]); // spades ace + hearts ace
        state.phase = RoundPhase::Play;
        core.parties.save_game_state(&round.id, state).await.unwrap();
    }

    let result = play_cards(
        &core,
        PlayCardsInput {
            party_id: created.party.id.clone(),
            user_id: "owner".into(),
            card_ids: vec![0, 13],
        },
    )
    .await
    .unwrap();
    assert!(result.round_ended);

    let party = core.parties.get_party(&created.party.id).await.unwrap().unwrap();
    // three active seats remain (no elimination at score 0), game continues
    assert_eq!(party.status, PartyStatus::Playing);
}

#[tokio::test]
async fn leave_during_playing_eliminates_the_seat_instead_of_freeing_it() {
    let core = new_core().await;
    for id in ["owner", "p1", "p2"] {
        core.users
            .create_user(User::new_human(id.into(), id.into()))
            .await
            .unwrap();
    }
    let created = create_party(
        &core,
        CreatePartyInput {
            owner_user_id: "owner".into(),
            name: "table".into(),
            visibility: PartyVisibility::Public,
            settings: PartySettings::new(3, 5),
            bot_seat_ids: None,
        },
    )
    .await
    .unwrap();
    for id in ["p1", "p2"] {
        join_party(
            &core,
            JoinPartyInput {
                party_id: created.party.id.clone(),
                user_id: id.into(),
            },
        )
        .await
        .unwrap();
    }
    start_party(
        &core,
        StartPartyInput {
            party_id: created.party.id.clone(),
            requester_user_id: "owner".into(),
        },
    )
    .await
    .unwrap();

    leave_party(
        &core,
        LeavePartyInput {
            party_id: created.party.id.clone(),
            user_id: "owner".into(),
        },
    )
    .await
    .unwrap();

    // the seat record is still present — only the waiting-room leave compacts it
    let players = core.parties.list_players(&created.party.id).await.unwrap();
    assert_eq!(players.len(), 3);

    let round = core
        .parties
        .get_active_round(&created.party.id)
        .await
        .unwrap()
        .unwrap();
    let state = core.parties.get_game_state(&round.id).await.unwrap().unwrap();
    assert!(state.is_eliminated(0));
    assert!(state.hand(0).is_empty());
    assert_ne!(state.current_turn, 0);

    let party = core.parties.get_party(&created.party.id).await.unwrap().unwrap();
    assert_eq!(party.status, PartyStatus::Playing);
}

#[tokio::test]
async fn leave_during_playing_ends_the_game_when_one_seat_remains() {
    let core = new_core().await;
    for id in ["owner", "p1", "p2"] {
        core.users
            .create_user(User::new_human(id.into(), id.into()))
            .await
            .unwrap();
    }
    let created = create_party(
        &core,
        CreatePartyInput {
            owner_user_id: "owner".into(),
            name: "table".into(),
            visibility: PartyVisibility::Public,
            settings: PartySettings::new(3, 5),
            bot_seat_ids: None,
        },
    )
    .await
    .unwrap();
    for id in ["p1", "p2"] {
        join_party(
            &core,
            JoinPartyInput {
                party_id: created.party.id.clone(),
                user_id: id.into(),
            },
        )
        .await
        .unwrap();
    }
    start_party(
        &core,
        StartPartyInput {
            party_id: created.party.id.clone(),
            requester_user_id: "owner".into(),
        },
    )
    .await
    .unwrap();

    for id in ["p1", "p2"] {
        leave_party(
            &core,
            LeavePartyInput {
                party_id: created.party.id.clone(),
                user_id: id.into(),
            },
        )
        .await
        .unwrap();
    }

    let party = core.parties.get_party(&created.party.id).await.unwrap().unwrap();
    assert_eq!(party.status, PartyStatus::Finished);
}

#[tokio::test]
async fn create_party_reserves_bot_seats_and_start_accepts_below_capacity() {
    use zapzap_engine::domain::entities::BotDifficulty;

    let core = new_core().await;
    core.users
        .create_user(User::new_human("owner".into(), "owner".into()))
        .await
        .unwrap();
    for id in ["bot-0", "bot-1"] {
        core.users
            .create_user(User::new_bot(id.into(), id.into(), BotDifficulty::Random))
            .await
            .unwrap();
    }

    let created = create_party(
        &core,
        CreatePartyInput {
            owner_user_id: "owner".into(),
            name: "table".into(),
            visibility: PartyVisibility::Public,
            settings: PartySettings::new(5, 5), // capacity 5, only 3 ever seated
            bot_seat_ids: Some(vec!["bot-0".into(), "bot-1".into()]),
        },
    )
    .await
    .unwrap();

    let players = core.parties.list_players(&created.party.id).await.unwrap();
    assert_eq!(players.len(), 3);

    start_party(
        &core,
        StartPartyInput {
            party_id: created.party.id.clone(),
            requester_user_id: "owner".into(),
        },
    )
    .await
    .unwrap();

    let round = core
        .parties
        .get_active_round(&created.party.id)
        .await
        .unwrap()
        .unwrap();
    let state = core.parties.get_game_state(&round.id).await.unwrap().unwrap();
    // seeded for the 3 actually-seated players, not the party's capacity of 5
    assert_eq!(state.player_count, 3);
    assert!(!state.hand(0).is_empty());
    assert!(!state.hand(1).is_empty());
    assert!(!state.hand(2).is_empty());
}
