//! Reveal Orchestrator
//!
//! A deterministic effects engine for staged page reveals. The host owns
//! rendering and real time; the orchestrator owns scheduling, easing,
//! theming, and reveal state, and is driven entirely through delta updates.

pub mod config;
pub mod easing;
pub mod effects;
pub mod error;
pub mod event;
pub mod ids;
pub mod orchestrator;
pub mod prefs;
pub mod schedule;
pub mod script;
pub mod stage;
pub mod theme;
pub mod time;

// Re-export common types for convenience
pub use config::{OrchestratorConfig, PerformanceThresholds};
pub use easing::{Easing, EasingCacheKey, EasingMetrics, EasingRegistry};
pub use effects::{
    InteractionEnhancer, Navigator, NullNavigator, PointerEvent, RegionKind, RegionState,
    RevealObserver, ScrollEffects, SequenceHandle, SplashScreen, SplashState,
    StagedSequencePlayer, ValueCounter,
};
pub use error::EffectError;
pub use event::{EffectEvent, EventDispatcher};
pub use ids::{FrameId, NodeId, RegionId, TimerId};
pub use orchestrator::{Orchestrator, OrchestratorMetrics, TickReport};
pub use prefs::{MemoryPreferenceStore, PreferenceStore};
pub use schedule::{EffectContext, FramePhase, Throttle, TickStats, TimerScheduler};
pub use script::{load_typing_script_from_json, ScriptLine, TypingScript};
pub use stage::{NodeBounds, Stage, StageRoot, TiltTransform, VisualNode};
pub use theme::{Theme, ThemeController};
pub use time::{EffectTime, TimeRange, Timer};

/// Reveal orchestrator result type
pub type Result<T> = core::result::Result<T, EffectError>;
