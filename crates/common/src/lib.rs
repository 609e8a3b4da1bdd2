//! Shared building blocks for the record services: logging setup and the
//! injectable time source.

pub mod clock;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
