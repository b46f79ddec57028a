/// Per-chat streak record.
pub mod user_streak;

pub use user_streak::*;
