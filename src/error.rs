//! Error types for the reveal orchestrator

use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, RegionId};

/// Comprehensive error type for orchestration operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EffectError {
    /// Stage node not found
    #[error("Stage node not found: {id:?}")]
    NodeNotFound { id: NodeId },

    /// Observed region not found
    #[error("Reveal region not found: {id:?}")]
    RegionNotFound { id: RegionId },

    /// Invalid time value
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f64 },

    /// Time out of range
    #[error("Time {time} is out of range [{start}, {end}]")]
    TimeOutOfRange { time: f64, start: f64, end: f64 },

    /// Invalid value
    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// Easing function not found
    #[error("Easing function not found: {name}")]
    EasingNotFound { name: String },

    /// Invalid state transition
    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidStateTransition { current: String, requested: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Preference store failure
    #[error("Preference store error: {reason}")]
    PreferenceError { reason: String },

    /// Generic orchestration error
    #[error("Effect error: {message}")]
    Generic { message: String },
}

impl EffectError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TimeOutOfRange { .. }
                | Self::InvalidStateTransition { .. }
                | Self::PreferenceError { .. }
        )
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NodeNotFound { .. } | Self::RegionNotFound { .. } => "stage",
            Self::InvalidTime { .. } | Self::TimeOutOfRange { .. } | Self::InvalidValue { .. } => {
                "validation"
            }
            Self::EasingNotFound { .. } => "easing",
            Self::InvalidStateTransition { .. } => "state",
            Self::SerializationError { .. } => "serialization",
            Self::PreferenceError { .. } => "prefs",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for EffectError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
