//! Booking entity: a user's reservation of ticket line items.

pub mod model;
pub mod status;

pub use model::{Booking, BookingLineItem, NewBooking, StatusUpdate};
pub use status::{BookingStatus, PaymentStatus};
