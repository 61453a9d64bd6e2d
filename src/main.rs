//! # Reading Plan Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database and the
//! static reading plan, starts the daily notification service, and runs
//! the Telegram bot alongside the health check server.

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod context;
mod database;
mod error;
mod plan;
mod progress;
mod services;
mod utils;

use crate::bot::dialogue::PendingInput;
use crate::config::Config;
use crate::context::AppContext;
use crate::database::connection::DatabaseManager;
use crate::plan::PlanStore;
use crate::services::health::HealthService;
use crate::services::scheduler::NotificationService;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reading_plan_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Reading Plan Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}",
        config.database_url, config.http_port
    );

    info!("Loading reading plan...");
    let plan = Arc::new(PlanStore::load()?);

    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let ctx = AppContext::new(db_arc.as_ref().clone(), plan.clone(), config.group_chat_id);

    info!("Initializing notification service...");
    let mut notification_service =
        match NotificationService::new(bot.clone(), db_arc.clone(), plan).await {
            Ok(service) => service,
            Err(e) => {
                tracing::error!("Failed to create notification service: {}", e);
                return Err(anyhow::anyhow!("Failed to create notification service: {}", e));
            }
        };

    if let Err(e) = notification_service.start().await {
        tracing::error!("Failed to start notification service: {}", e);
    } else {
        info!("Notification service started successfully");
    }

    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        let storage = InMemStorage::<PendingInput>::new();
        Dispatcher::builder(bot, bot::handlers::schema())
            .dependencies(dptree::deps![storage, ctx])
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

    if let Err(e) = notification_service.stop().await {
        tracing::warn!("Error stopping notification service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
