//! # aviola-service
//!
//! Domain services for the Aviola ticketing backend. The centerpiece is
//! the [`booking::BookingEngine`], which turns requested ticket
//! quantities into confirmed bookings without ever overselling a seat
//! pool, compensating partially reserved seats when a multi-category
//! request fails midway.
//!
//! Storage is abstracted behind the [`inventory::InventoryStore`],
//! [`event::EventCatalog`], and [`booking::BookingLedger`] traits, each
//! shipped with a PostgreSQL implementation and an in-memory
//! implementation for single-node and test use.

pub mod booking;
pub mod event;
pub mod inventory;
pub mod payment;
