//! Concrete repository implementations over `PgPool`.

pub mod booking;
pub mod category;
pub mod event;
