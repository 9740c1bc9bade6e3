//! Shared data structures for trajectory deviation analysis
//!
//! - Positions, depth convention and index-aligned trajectories
//! - Per-sample deviation results, zones and target status
//! - Instrument-supplied directional readout
//! - The error taxonomy shared by the analyzer and scene builder

mod error;
mod trajectory;
mod deviation;
mod readout;

pub use error::*;
pub use trajectory::*;
pub use deviation::*;
pub use readout::*;
