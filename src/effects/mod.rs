//! Staged reveal effects
//!
//! Each effect owns its own registration state and is driven externally:
//! host input events arrive through the orchestrator, time arrives through
//! the scheduler. Effects talk to the world only through the stage, the
//! event dispatcher, and the scheduling context they are handed.

pub mod counter;
pub mod interaction;
pub mod reveal;
pub mod scroll;
pub mod sequence;
pub mod splash;

pub use counter::*;
pub use interaction::*;
pub use reveal::*;
pub use scroll::*;
pub use sequence::*;
pub use splash::*;
