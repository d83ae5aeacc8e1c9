//! Shared handle passed to every action-api operation and the bot
//! orchestrator: repositories, the event bus, and the party lock registry.
//!
//! The reference engine threads an `Arc<AppState>` carrying an individual
//! repository plus a broadcast sender into every use case constructor. This
//! collapses that into one `Core` built once at startup, since the action
//! api and orchestrator both need the same three collaborators together.

use std::sync::Arc;

use crate::concurrency::PartyLockRegistry;
use crate::domain::repositories::{PartyRepository, UserRepository};
use crate::events::EventBus;

pub struct Core {
    pub parties: Arc<dyn PartyRepository>,
    pub users: Arc<dyn UserRepository>,
    pub events: EventBus,
    pub locks: PartyLockRegistry,
}

impl Core {
    pub fn new(parties: Arc<dyn PartyRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            parties,
            users,
            events: EventBus::new(),
            locks: PartyLockRegistry::new(),
        }
    }
}
