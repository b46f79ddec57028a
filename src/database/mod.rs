/// SQLite pool setup and embedded migrations
pub mod connection;
/// Row types and their queries
pub mod models;
