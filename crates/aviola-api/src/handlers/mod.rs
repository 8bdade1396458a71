//! HTTP request handlers.

pub mod admin;
pub mod booking;
pub mod event;
pub mod health;
