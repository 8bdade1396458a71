//! # aviola-entity
//!
//! Domain models for the Aviola ticketing backend: events, ticket
//! categories (seat inventory), and bookings. All models derive `serde`
//! traits and `sqlx::FromRow` so they map directly onto database rows.

pub mod booking;
pub mod category;
pub mod event;
