/// HTTP liveness and readiness endpoints
pub mod health;
/// Daily Yes/No prompt scheduling and fan-out
pub mod prompt;
/// Streak state transitions driven by messages and button presses
pub mod streak;
