//! Easing functions and cached evaluation

pub mod cache;
pub mod functions;
pub mod metrics;
pub mod registry;

pub use cache::*;
pub use functions::*;
pub use metrics::*;
pub use registry::*;
