/// Command definitions
pub mod commands;
/// Update dispatch and event handlers
pub mod handlers;
