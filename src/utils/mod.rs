/// Date arithmetic for streak counting
pub mod datetime;
/// Structured log helpers shared by handlers and services
pub mod logging;
/// Parsing and validation of user input
pub mod validation;
