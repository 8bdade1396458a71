//! # aviola-database
//!
//! PostgreSQL persistence for the Aviola ticketing backend: connection
//! pool management, embedded migrations, and the concrete repositories.

pub mod connection;
pub mod migration;
pub mod repositories;
