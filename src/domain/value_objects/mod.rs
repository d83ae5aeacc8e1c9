mod game_state;
mod party_settings;

pub use game_state::*;
pub use party_settings::*;
