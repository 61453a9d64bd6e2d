//! # Reading Plan Bot
//!
//! A Telegram bot that walks each user through a fixed 365-day reading plan.
//!
//! ## Features
//! - One reading per day, marked complete with a single tap
//! - Progress and pace statistics per user and for the whole group
//! - Daily reminder at 06:00 to every active user
//! - Enrollment with prior progress for returning readers
//! - Persistent storage with SQLite

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Shared application context passed to all components
pub mod context;
/// Database models, connections, and migrations
pub mod database;
/// Error taxonomy for store and handler failures
pub mod error;
/// Static 365-day reading plan resource
pub mod plan;
/// Pure progress state machine and derived statistics
pub mod progress;
/// Background services: daily notifications and health checks
pub mod services;
/// Input validation helpers
pub mod utils;
