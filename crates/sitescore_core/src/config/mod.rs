//! Configuration types shared by every scoring mode.
//!
//! - `mapping` - Factor-to-column assignment with explicit defaults

mod mapping;

pub use mapping::*;
