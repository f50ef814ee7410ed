//! # devnotify Library
//!
//! This library provides the core functionality for the devnotify service:
//! GitHub webhook ingestion, subscription matching and fan-out of repository
//! event notifications into Telegram chats.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub mod webhooks;
pub use migration;
