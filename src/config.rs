//! Orchestrator configuration
//!
//! Every timing and geometry constant used by the effect components lives
//! here so hosts can retune a page without touching component code.

use serde::{Deserialize, Serialize};

use crate::time::EffectTime;

/// Millisecond shorthand for the defaults below.
fn millis(ms: u64) -> EffectTime {
    EffectTime::from_nanos(ms.saturating_mul(1_000_000))
}

/// Thresholds for runtime performance warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceThresholds {
    /// Maximum acceptable wall time for a single update, in milliseconds
    pub max_tick_time_ms: f64,
    /// Maximum acceptable number of concurrent frame subscriptions
    pub max_active_frames: usize,
}

impl PerformanceThresholds {
    /// Check whether a tick's wall time is acceptable
    #[inline]
    pub fn is_tick_time_acceptable(&self, tick_ms: f64) -> bool {
        tick_ms <= self.max_tick_time_ms
    }

    /// Check whether the current frame subscription load is acceptable
    #[inline]
    pub fn is_frame_load_acceptable(&self, active_frames: usize) -> bool {
        active_frames <= self.max_active_frames
    }
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            max_tick_time_ms: 16.0,
            max_active_frames: 64,
        }
    }
}

/// Configurable settings for the orchestrator and its effect components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Duration of a counter animation
    pub counter_duration: EffectTime,
    /// Easing applied to counter animations
    pub counter_easing: String,
    /// Delay between consecutive children in a staggered reveal
    pub stagger_interval: EffectTime,
    /// Visible fraction at which a region counts as intersecting
    pub reveal_threshold: f64,
    /// Early-trigger margin in host pixels, applied at the viewport bottom
    pub reveal_margin: f64,
    /// Length of the theme transition window opened by a toggle
    pub theme_transition: EffectTime,
    /// How long a typed line keeps its typing pulse
    pub typing_pulse: EffectTime,
    /// Lifetime of a ripple overlay before it is removed
    pub ripple_lifetime: EffectTime,
    /// Divisor mapping pointer distance from center to tilt degrees
    pub tilt_divisor: f64,
    /// Perspective depth reported with tilt transforms
    pub tilt_perspective: f64,
    /// Optional throttle interval for tilt updates; None applies every move
    pub tilt_throttle: Option<EffectTime>,
    /// Busy label shown while a hold-to-navigate press is pending
    pub busy_label: String,
    /// Hold time between a navigation press and the navigator call
    pub hold_before_navigate: EffectTime,
    /// Scroll offset past which the header condenses
    pub header_threshold: f64,
    /// Multiplier from scroll offset to parallax node offset
    pub parallax_rate: f64,
    /// Minimum interval between processed scroll samples
    pub scroll_throttle: EffectTime,
    /// Time for the splash progress bar to fill
    pub splash_fill: EffectTime,
    /// Hold time between the host load signal and the splash fade
    pub splash_hold: EffectTime,
    /// Length of the splash fade before the overlay is removed
    pub splash_fade: EffectTime,
    /// Capacity of the easing result cache
    pub max_cache_size: usize,
    /// Collapse animated durations to zero; counters then write their
    /// target directly instead of animating
    pub reduced_motion: bool,
    /// Performance warning thresholds
    pub performance_thresholds: PerformanceThresholds,
}

impl OrchestratorConfig {
    /// Zero out the animated durations. Applied by the orchestrator when
    /// `reduced_motion` is set; functional delays such as the navigation
    /// hold are left intact, and counters keep their duration but skip the
    /// animation entirely.
    pub fn with_motion_collapsed(mut self) -> Self {
        self.stagger_interval = EffectTime::zero();
        self.theme_transition = EffectTime::zero();
        self.typing_pulse = EffectTime::zero();
        self.ripple_lifetime = EffectTime::zero();
        self.splash_fill = EffectTime::zero();
        self.splash_hold = EffectTime::zero();
        self.splash_fade = EffectTime::zero();
        self
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            counter_duration: millis(1500),
            counter_easing: "ease-out-quartic".to_string(),
            stagger_interval: millis(100),
            reveal_threshold: 0.1,
            reveal_margin: 50.0,
            theme_transition: millis(300),
            typing_pulse: millis(300),
            ripple_lifetime: millis(600),
            tilt_divisor: 10.0,
            tilt_perspective: 1000.0,
            tilt_throttle: None,
            busy_label: "Processing...".to_string(),
            hold_before_navigate: millis(1000),
            header_threshold: 50.0,
            parallax_rate: -0.3,
            scroll_throttle: millis(16),
            splash_fill: millis(2000),
            splash_hold: millis(1000),
            splash_fade: millis(500),
            max_cache_size: 1000,
            reduced_motion: false,
            performance_thresholds: PerformanceThresholds::default(),
        }
    }
}
