//! Domain events module.
//!
//! Provides domain event types, the sink trait for emitting events after
//! confirmed gateway round trips, and the error sink that receives failure
//! reports. Presentation adapters implement the sinks.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
