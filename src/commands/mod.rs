//! Command implementations for the ctascope CLI

mod analyze;
mod misc;

pub use analyze::*;
pub use misc::*;
