//! # Sober Streak Bot
//!
//! A Telegram bot that counts days without alcohol.
//!
//! ## Features
//! - `/start` explains how to begin tracking
//! - Sending a `YYYY-MM-DD` date (re)starts the count from that day
//! - Every day at 09:00 Moscow time each user is asked whether they drank yesterday
//! - Yes/No answers reset or extend the streak
//! - Persistent storage with SQLite

/// Bot command handlers and update dispatch
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Shared application context and event kinds
pub mod context;
/// Database models, connections, and migrations
pub mod database;
/// Streak transitions, the daily prompt scheduler and the HTTP health surface
pub mod services;
/// Utility functions for dates, validation, and logging
pub mod utils;
