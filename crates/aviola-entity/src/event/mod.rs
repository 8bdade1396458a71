//! Event entity: model, kind, and lifecycle status.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::EventKind;
pub use model::{CreateEvent, Event};
pub use status::EventStatus;
