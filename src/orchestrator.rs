//! Top-level orchestrator owning the stage, the scheduler, and every effect
//!
//! The host forwards input events (intersections, pointer activity, scroll
//! offsets, scheme changes) as they happen and calls `update` once per host
//! frame with the elapsed delta. Each update returns a `TickReport` with the
//! events that fired so the host can mirror stage changes.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::OrchestratorConfig;
use crate::easing::EasingRegistry;
use crate::effects::interaction::{InteractionEnhancer, Navigator, NullNavigator, PointerEvent};
use crate::effects::reveal::{RegionKind, RevealObserver};
use crate::effects::scroll::ScrollEffects;
use crate::effects::sequence::{SequenceHandle, StagedSequencePlayer};
use crate::effects::splash::SplashScreen;
use crate::error::EffectError;
use crate::event::{EffectEvent, EventDispatcher};
use crate::ids::{NodeId, RegionId};
use crate::prefs::{MemoryPreferenceStore, PreferenceStore};
use crate::schedule::{EffectContext, TickStats, TimerScheduler};
use crate::script::TypingScript;
use crate::stage::Stage;
use crate::theme::{Theme, ThemeController};
use crate::time::{EffectTime, Timer};

/// Snapshot of one update: what ran, what it emitted, and how long the
/// tick took in wall time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub epoch: u64,
    pub dt: EffectTime,
    pub timers_fired: u32,
    pub frames_run: u32,
    pub errors: u32,
    pub events: Vec<EffectEvent>,
    pub tick_ms: f64,
}

/// Running totals across the orchestrator's lifetime.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorMetrics {
    pub ticks: u64,
    pub timers_fired: u64,
    pub frames_run: u64,
    pub errors: u64,
    pub scroll_events: u64,
    pub last_tick_ms: f64,
    pub average_tick_ms: f64,
    pub total_tick_ms: f64,
}

impl OrchestratorMetrics {
    pub fn record_tick(&mut self, stats: &TickStats, tick_ms: f64) {
        self.ticks += 1;
        self.timers_fired += stats.timers_fired as u64;
        self.frames_run += stats.frames_run as u64;
        self.errors += stats.errors as u64;
        self.last_tick_ms = tick_ms;
        self.total_tick_ms += tick_ms;
        self.average_tick_ms = self.total_tick_ms / self.ticks as f64;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Single-threaded driver for a page's staged reveal effects.
///
/// Construction wires defaults that work standalone: an in-memory
/// preference store, a navigator that goes nowhere, and a light theme.
/// Hosts swap in their own collaborators with the `with_*` builders before
/// driving time.
pub struct Orchestrator {
    config: OrchestratorConfig,
    stage: Stage,
    scheduler: TimerScheduler,
    easings: EasingRegistry,
    events: EventDispatcher,
    prefs: Box<dyn PreferenceStore>,
    navigator: Box<dyn Navigator>,
    theme: ThemeController,
    reveals: RevealObserver,
    interactions: InteractionEnhancer,
    scroll: ScrollEffects,
    splash: Option<SplashScreen>,
    system_scheme: Option<Theme>,
    epoch: u64,
    metrics: OrchestratorMetrics,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        let config = if config.reduced_motion {
            config.with_motion_collapsed()
        } else {
            config
        };
        let mut stage = Stage::new();
        let prefs: Box<dyn PreferenceStore> = Box::new(MemoryPreferenceStore::new());
        let theme =
            ThemeController::initialize(prefs.as_ref(), None, config.theme_transition, &mut stage);
        let easings = EasingRegistry::new(config.max_cache_size);
        let reveals = RevealObserver::new(&config);
        let interactions = InteractionEnhancer::new(&config);
        Self {
            stage,
            scheduler: TimerScheduler::new(),
            easings,
            events: EventDispatcher::new(),
            prefs,
            navigator: Box::new(NullNavigator),
            theme,
            reveals,
            interactions,
            scroll: ScrollEffects::new(),
            splash: None,
            system_scheme: None,
            epoch: 0,
            metrics: OrchestratorMetrics::default(),
            config,
        }
    }

    /// Install a preference store. Re-resolves the theme, since a stored
    /// preference takes priority over everything else.
    pub fn with_preferences(mut self, prefs: impl PreferenceStore + 'static) -> Self {
        self.prefs = Box::new(prefs);
        self.theme = ThemeController::initialize(
            self.prefs.as_ref(),
            self.system_scheme,
            self.config.theme_transition,
            &mut self.stage,
        );
        self
    }

    /// Install a navigator for click-to-navigate bindings.
    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Box::new(navigator);
        self
    }

    /// Report the host's current system color scheme. Re-resolves the theme;
    /// the scheme only wins when no preference is stored.
    pub fn with_system_scheme(mut self, scheme: Theme) -> Self {
        self.system_scheme = Some(scheme);
        self.theme = ThemeController::initialize(
            self.prefs.as_ref(),
            self.system_scheme,
            self.config.theme_transition,
            &mut self.stage,
        );
        self
    }

    /// Advance logical time by `dt` and run everything that becomes due.
    pub fn update(&mut self, dt: impl Into<EffectTime>) -> Result<TickReport, EffectError> {
        let dt = dt.into();
        let timer = Timer::new();
        self.epoch = self.epoch.wrapping_add(1);

        let stats = {
            let mut ctx = EffectContext::new(
                &mut self.stage,
                &mut self.easings,
                &mut self.events,
                self.navigator.as_mut(),
                &self.config,
            );
            self.scheduler.advance(dt, &mut ctx)
        };

        let tick_ms = timer.elapsed_ms();
        self.metrics.record_tick(&stats, tick_ms);

        let thresholds = &self.config.performance_thresholds;
        if !thresholds.is_tick_time_acceptable(tick_ms) {
            warn!(
                "tick took {:.3}ms, budget {:.3}ms",
                tick_ms, thresholds.max_tick_time_ms
            );
            self.events.emit(EffectEvent::PerformanceWarning {
                metric: "tick_time_ms".to_string(),
                value: tick_ms,
                threshold: thresholds.max_tick_time_ms,
            });
        }
        let active_frames = self.scheduler.active_frames();
        if !thresholds.is_frame_load_acceptable(active_frames) {
            warn!(
                "{} active frame subscriptions, budget {}",
                active_frames, thresholds.max_active_frames
            );
            self.events.emit(EffectEvent::PerformanceWarning {
                metric: "active_frames".to_string(),
                value: active_frames as f64,
                threshold: thresholds.max_active_frames as f64,
            });
        }

        let events = self.events.take_events();
        Ok(TickReport {
            epoch: self.epoch,
            dt,
            timers_fired: stats.timers_fired,
            frames_run: stats.frames_run,
            errors: stats.errors,
            events,
            tick_ms,
        })
    }

    /// Register a reveal region on the observer.
    pub fn observe(&mut self, node: NodeId, kind: RegionKind) -> RegionId {
        self.reveals.observe(node, kind)
    }

    /// Host intersection callback with a precomputed flag.
    pub fn intersection(
        &mut self,
        region: RegionId,
        is_intersecting: bool,
    ) -> Result<(), EffectError> {
        self.reveals.intersection(
            region,
            is_intersecting,
            &mut self.scheduler,
            &mut self.stage,
            &mut self.events,
            &self.config,
        )
    }

    /// Host intersection callback with a raw visibility ratio.
    pub fn intersection_ratio(&mut self, region: RegionId, ratio: f64) -> Result<(), EffectError> {
        self.reveals.intersection_ratio(
            region,
            ratio,
            &mut self.scheduler,
            &mut self.stage,
            &mut self.events,
            &self.config,
        )
    }

    /// Host pointer input.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<(), EffectError> {
        self.interactions.pointer(
            event,
            &mut self.scheduler,
            &mut self.stage,
            &mut self.events,
            self.navigator.as_mut(),
            &self.config,
        )
    }

    /// Host scroll report at the given offset.
    pub fn scroll(&mut self, offset: f64) -> Result<(), EffectError> {
        self.metrics.scroll_events += 1;
        self.scroll
            .scroll(offset, self.scheduler.now(), &mut self.stage, &self.config)
    }

    /// User toggled the theme control.
    pub fn toggle_theme(&mut self) -> Result<(), EffectError> {
        self.theme.toggle(
            self.prefs.as_mut(),
            &mut self.scheduler,
            &mut self.stage,
            &mut self.events,
        )
    }

    /// Host reported a system color scheme change.
    pub fn system_scheme_changed(&mut self, scheme: Theme) -> Result<(), EffectError> {
        self.system_scheme = Some(scheme);
        self.theme
            .system_scheme_changed(scheme, &mut self.stage, &mut self.events)
    }

    /// Put up the splash screen and start filling its bar. At most one
    /// splash exists per orchestrator.
    pub fn start_splash(&mut self, overlay: NodeId, bar: NodeId) -> Result<(), EffectError> {
        if self.splash.is_some() {
            return Err(EffectError::InvalidStateTransition {
                current: "splash active".to_string(),
                requested: "splash start".to_string(),
            });
        }
        let mut splash = SplashScreen::new(overlay, bar, &self.config);
        splash.start(&mut self.scheduler, &mut self.stage)?;
        self.splash = Some(splash);
        Ok(())
    }

    /// Host finished loading; dismiss the splash screen if there is one.
    pub fn host_loaded(&mut self) -> Result<(), EffectError> {
        match self.splash.as_mut() {
            Some(splash) => splash.dismiss(&mut self.scheduler, &mut self.events),
            None => {
                debug!("host load reported with no splash screen");
                Ok(())
            }
        }
    }

    /// Start an arbitrary staged sequence.
    pub fn play_sequence(&mut self, player: StagedSequencePlayer) -> SequenceHandle {
        player.start(&mut self.scheduler, &mut self.events)
    }

    /// Compile a typing script onto the stage and start its sequence.
    pub fn play_typing_script(&mut self, script: &TypingScript) -> (Vec<NodeId>, SequenceHandle) {
        let (nodes, player) = script.compile(&mut self.stage, self.config.typing_pulse);
        let handle = player.start(&mut self.scheduler, &mut self.events);
        (nodes, handle)
    }

    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[inline]
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    #[inline]
    pub fn easings(&self) -> &EasingRegistry {
        &self.easings
    }

    #[inline]
    pub fn easings_mut(&mut self) -> &mut EasingRegistry {
        &mut self.easings
    }

    #[inline]
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    #[inline]
    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    #[inline]
    pub fn prefs(&self) -> &dyn PreferenceStore {
        self.prefs.as_ref()
    }

    #[inline]
    pub fn prefs_mut(&mut self) -> &mut dyn PreferenceStore {
        self.prefs.as_mut()
    }

    #[inline]
    pub fn scheduler(&self) -> &TimerScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn reveals(&self) -> &RevealObserver {
        &self.reveals
    }

    #[inline]
    pub fn reveals_mut(&mut self) -> &mut RevealObserver {
        &mut self.reveals
    }

    #[inline]
    pub fn interactions_mut(&mut self) -> &mut InteractionEnhancer {
        &mut self.interactions
    }

    #[inline]
    pub fn scroll_effects_mut(&mut self) -> &mut ScrollEffects {
        &mut self.scroll
    }

    #[inline]
    pub fn splash(&self) -> Option<&SplashScreen> {
        self.splash.as_ref()
    }

    #[inline]
    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    #[inline]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    #[inline]
    pub fn metrics(&self) -> &OrchestratorMetrics {
        &self.metrics
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(OrchestratorConfig::default())
    }
}
