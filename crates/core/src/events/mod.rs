//! Domain events module.
//!
//! Event types emitted after committed mutations and the sink they are sent
//! through.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
