//! Booking domain: ledger, transaction engine, reference generation,
//! and the pending-booking expiry sweeper.

pub mod engine;
pub mod ledger;
pub mod memory;
pub mod postgres;
pub mod reference;
pub mod sweeper;

pub use engine::{BookingEngine, TicketSelection};
pub use ledger::BookingLedger;
pub use memory::MemoryBookingLedger;
pub use postgres::PgBookingLedger;
pub use sweeper::ExpirySweeper;
