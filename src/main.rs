//! # Sober Streak Bot Main Entry Point
//!
//! Initializes logging, loads configuration, connects the database, starts the
//! daily prompt scheduler and the health server, and runs the Telegram bot.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod context;
mod database;
mod services;
mod utils;

use crate::bot::handlers::BotHandler;
use crate::config::Config;
use crate::context::AppContext;
use crate::database::connection::DatabaseManager;
use crate::services::health::HealthService;
use crate::services::prompt::{PromptService, TelegramPrompter};
use crate::utils::logging::log_system_event;
use std::sync::Arc;
use std::time::Duration;

const MIGRATION_RETRY_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sober_streak_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Sober Streak Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, HTTP Port: {}",
        config.database_url, config.http_port);

    // A store that is down at startup is logged, not fatal. Operations fail on
    // their own until it comes back and the background migration succeeds.
    info!("Initializing database connection...");
    let db_manager = match connect_database(&config.database_url).await {
        Ok(db) => {
            info!("Database initialized successfully");
            db
        }
        Err(e) => {
            tracing::error!("Database connection error: {}", e);
            // The URL was validated with the config, so only the store itself is down
            let lazy = DatabaseManager::connect_lazy(&config.database_url)?;
            let migrator = lazy.clone();
            tokio::spawn(async move {
                migrator.run_migrations_with_retry(MIGRATION_RETRY_INTERVAL).await;
            });
            lazy
        }
    };
    let db_arc = Arc::new(db_manager);

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(AppContext::new(db_arc.as_ref().clone()));
    info!("Telegram bot initialized successfully");

    // Initialize and start the daily prompt
    info!("Initializing prompt service...");
    let sender = Arc::new(TelegramPrompter::new(bot.clone()));
    let mut prompt_service = match PromptService::new(sender, db_arc.clone()).await {
        Ok(service) => {
            info!("Prompt service initialized successfully");
            service
        },
        Err(e) => {
            tracing::error!("Failed to create prompt service: {}", e);
            return Err(anyhow::anyhow!("Failed to create prompt service: {}", e));
        }
    };

    if let Err(e) = prompt_service.start().await {
        tracing::error!("Failed to start prompt service: {}", e);
    } else {
        info!("Prompt service started successfully");
    }

    // Initialize health service
    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Web server listening on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .default_handler(|upd| async move {
                tracing::trace!("Ignoring update {:?}", upd.id);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    log_system_event("Bot started and polling", None);

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Stop prompt service on shutdown
    if let Err(e) = prompt_service.stop().await {
        tracing::warn!("Error stopping prompt service: {}", e);
    }

    log_system_event("Application stopped", None);
    Ok(())
}

async fn connect_database(database_url: &str) -> Result<DatabaseManager> {
    let db_manager = DatabaseManager::new(database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    Ok(db_manager)
}
