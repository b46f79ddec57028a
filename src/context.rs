use std::fmt;

use crate::database::connection::DatabaseManager;

/// Shared handles every handler needs, built once in `main`.
#[derive(Clone)]
pub struct AppContext {
    /// Streak store.
    pub db: DatabaseManager,
}

impl AppContext {
    /// Wraps the database handle.
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

/// The three things that can wake the bot up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotEvent {
    /// A chat message, command or date.
    Text,
    /// A Yes/No button press.
    Callback,
    /// The daily scheduled prompt.
    Timer,
}

impl fmt::Display for BotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BotEvent::Text => "text",
            BotEvent::Callback => "callback",
            BotEvent::Timer => "timer",
        };
        f.write_str(name)
    }
}
