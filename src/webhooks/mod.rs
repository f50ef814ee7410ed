//! # Webhook Event Pipeline
//!
//! Signature-authenticated GitHub webhook intake, event-kind dispatch,
//! subscription/branch matching and per-subscriber fan-out.

pub mod branch;
pub mod classify;
pub mod dispatch;
pub mod events;
pub mod handlers;
pub mod signature;
