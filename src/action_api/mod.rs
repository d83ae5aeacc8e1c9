//! External action surface: one async function per mutating operation,
//! each acquiring the party lock, loading state, applying a domain-layer
//! transition, persisting, and publishing events — in that order.

mod advance_round;
mod call_zapzap;
mod common;
mod create_party;
mod draw_card;
mod join_party;
mod leave_party;
mod play_cards;
mod start_party;

pub use advance_round::*;
pub use call_zapzap::*;
pub use create_party::*;
pub use draw_card::*;
pub use join_party::*;
pub use leave_party::*;
pub use play_cards::*;
pub use start_party::*;
