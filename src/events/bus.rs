//! Typed event bus with subscriber-side filtering.
//!
//! The reference engine fans state changes out over a single unfiltered
//! `tokio::sync::broadcast` channel (`infrastructure::app_state::AppState`'s
//! `broadcast_event`) and lets every websocket handler decide what it cares
//! about. Reworked here around `async_broadcast` with an explicit
//! `{userId?, partyId?}` subscriber filter, so the fan-out itself narrows
//! the stream instead of pushing that decision into every consumer.
//!
//! Ordering: events about the same party are only ever published while that
//! party's lock (`crate::concurrency::PartyLockRegistry`) is held, so two
//! subscribers that both filter on the same `partyId` observe events in the
//! same relative order they were committed.

use async_broadcast::{Receiver, Sender};
use serde::Serialize;

const CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    UserConnected {
        user_id: String,
        timestamp: i64,
    },
    UserStatusChanged {
        user_id: String,
        online: bool,
        timestamp: i64,
    },
    PartyCreated {
        party_id: String,
        timestamp: i64,
    },
    PartyUpdated {
        party_id: String,
        timestamp: i64,
    },
    PartyDeleted {
        party_id: String,
        timestamp: i64,
    },
    PlayerJoined {
        party_id: String,
        user_id: String,
        timestamp: i64,
    },
    PlayerLeft {
        party_id: String,
        user_id: String,
        timestamp: i64,
    },
    RoundStarted {
        party_id: String,
        round_id: String,
        timestamp: i64,
    },
    RoundEnded {
        party_id: String,
        round_id: String,
        timestamp: i64,
    },
    GameEnded {
        party_id: String,
        winner_user_id: Option<String>,
        timestamp: i64,
    },
    StateChanged {
        party_id: String,
        timestamp: i64,
    },
}

impl Event {
    pub fn party_id(&self) -> Option<&str> {
        match self {
            Event::UserConnected { .. } | Event::UserStatusChanged { .. } => None,
            Event::PartyCreated { party_id, .. }
            | Event::PartyUpdated { party_id, .. }
            | Event::PartyDeleted { party_id, .. }
            | Event::PlayerJoined { party_id, .. }
            | Event::PlayerLeft { party_id, .. }
            | Event::RoundStarted { party_id, .. }
            | Event::RoundEnded { party_id, .. }
            | Event::GameEnded { party_id, .. }
            | Event::StateChanged { party_id, .. } => Some(party_id),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Event::UserConnected { user_id, .. } | Event::UserStatusChanged { user_id, .. } => {
                Some(user_id)
            }
            Event::PlayerJoined { user_id, .. } | Event::PlayerLeft { user_id, .. } => {
                Some(user_id)
            }
            _ => None,
        }
    }
}

/// Subscriber-side filter: `None` on a field means "any".
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub user_id: Option<String>,
    pub party_id: Option<String>,
}

impl EventFilter {
    pub fn for_party(party_id: impl Into<String>) -> Self {
        Self {
            user_id: None,
            party_id: Some(party_id.into()),
        }
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            party_id: None,
        }
    }

    fn matches(&self, event: &Event) -> bool {
        if let Some(want) = &self.party_id {
            if event.party_id() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = &self.user_id {
            if event.user_id() != Some(want.as_str()) {
                return false;
            }
        }
        true
    }
}

pub struct EventBus {
    sender: Sender<Event>,
    // keep one live receiver so the channel never closes while idle
    _keepalive: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (mut sender, receiver) = async_broadcast::broadcast(CHANNEL_CAPACITY);
        sender.set_overflow(true);
        Self {
            sender,
            _keepalive: receiver,
        }
    }

    /// Publish an event to every matching subscriber. Must be called while
    /// holding the lock for `event.party_id()`, when present.
    pub fn publish(&self, event: Event) {
        let _ = self.sender.try_broadcast(event);
    }

    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        Subscription {
            receiver: self.sender.new_receiver(),
            filter,
        }
    }
}

/// A filtered view over the bus. `recv` skips non-matching events rather
/// than surfacing them to the caller.
pub struct Subscription {
    receiver: Receiver<Event>,
    filter: EventFilter,
}

impl Subscription {
    pub async fn recv(&mut self) -> Option<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    }
}
