//! Cooperative single-threaded scheduling
//!
//! The host drives the scheduler with delta updates; one-shot timers and
//! per-frame callbacks run to completion inside each advance. Callbacks
//! never touch the scheduler directly; follow-up work goes through the
//! tick's EffectContext and is absorbed between passes.

pub mod context;
pub mod scheduler;
pub mod throttle;

pub use context::*;
pub use scheduler::*;
pub use throttle::*;
