//! # Brokerage Listings API Library
//!
//! Core functionality for the listings service: entities, the generic
//! resource service, handlers and server configuration.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod format;
pub mod handlers;
pub mod models;
pub mod resources;
pub mod server;
pub mod telemetry;
pub use migration;
