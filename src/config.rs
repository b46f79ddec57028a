use anyhow::{anyhow, Result};
use std::env;

use crate::database::connection::validate_database_url;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/streaks.db";
const DEFAULT_HTTP_PORT: &str = "3000";

/// Process configuration read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API token from `TELEGRAM_BOT_TOKEN` or `BOT_TOKEN`.
    pub telegram_bot_token: String,
    /// SQLite URL from `DATABASE_URL`.
    pub database_url: String,
    /// Port for the health server, from `HTTP_PORT` or `PORT`.
    pub http_port: u16,
}

impl Config {
    /// Reads and validates every setting; a bad value is reported here rather
    /// than when the bot first touches it.
    pub fn from_env() -> Result<Self> {
        // BOT_TOKEN and PORT are the names older deployments (and most PaaS hosts) use.
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .or_else(|_| env::var("BOT_TOKEN"))
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = database_url_from_env();
        validate_database_url(&database_url)
            .map_err(|e| anyhow!("Invalid DATABASE_URL: {}", e))?;

        let port_str = env::var("HTTP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
        })
    }
}

/// `DATABASE_URL`, or the bundled SQLite file when unset or empty.
pub fn database_url_from_env() -> String {
    match env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_DATABASE_URL.to_string(),
    }
}
