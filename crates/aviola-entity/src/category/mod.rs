//! Ticket category entity: a priced seat pool within an event.

pub mod model;

pub use model::{CreateTicketCategory, ReserveOutcome, TicketCategory};
