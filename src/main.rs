use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use zapzap_engine::action_api::{create_party, start_party, CreatePartyInput, StartPartyInput};
use zapzap_engine::bot::{BotOrchestrator, OrchestratorConfig};
use zapzap_engine::domain::entities::{BotDifficulty, PartyVisibility, User};
use zapzap_engine::domain::value_objects::PartySettings;
use zapzap_engine::repositories::{InMemoryPartyRepository, InMemoryUserRepository};
use zapzap_engine::Core;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let core = Arc::new(Core::new(
        Arc::new(InMemoryPartyRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    ));

    let owner = User::new_human("owner-1".into(), "owner".into());
    core.users.create_user(owner.clone()).await.unwrap();

    for i in 0..3 {
        let bot = User::new_bot(
            format!("bot-{i}"),
            format!("bot-{i}"),
            BotDifficulty::Random,
        );
        core.users.create_user(bot).await.unwrap();
    }

    let created = create_party(
        &core,
        CreatePartyInput {
            owner_user_id: owner.id.clone(),
            name: "demo table".into(),
            visibility: PartyVisibility::Public,
            settings: PartySettings::new(4, 5),
            bot_seat_ids: Some((0..3).map(|i| format!("bot-{i}")).collect()),
        },
    )
    .await
    .expect("create party");

    start_party(
        &core,
        StartPartyInput {
            party_id: created.party.id.clone(),
            requester_user_id: owner.id.clone(),
        },
    )
    .await
    .expect("start party");

    tracing::info!(party_id = %created.party.id, "party started, bot orchestrator taking over");

    let orchestrator = BotOrchestrator::new(core.clone(), OrchestratorConfig::default());
    tokio::spawn(orchestrator.run());

    tokio::time::sleep(Duration::from_secs(30)).await;
}
