use serde::{Deserialize, Serialize};

/// Whether a user is a human client or an in-process bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Human,
    Bot,
}

/// Bot difficulty / strategy selector. The strategies themselves are out of
/// this crate's scope (spec.md §1 Non-goals); this enum only routes a bot
/// seat to the strategy the orchestrator should resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Random,
    Forfeit,
}

/// A user known to the system, human or bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub user_type: UserType,
    pub bot_difficulty: Option<BotDifficulty>,
    pub created_at: i64,
}

impl User {
    pub fn new_human(id: String, username: String) -> Self {
        Self {
            id,
            username,
            user_type: UserType::Human,
            bot_difficulty: None,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn new_bot(id: String, username: String, difficulty: BotDifficulty) -> Self {
        Self {
            id,
            username,
            user_type: UserType::Bot,
            bot_difficulty: Some(difficulty),
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn is_bot(&self) -> bool {
        self.user_type == UserType::Bot
    }
}
