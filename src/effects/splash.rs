use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::OrchestratorConfig;
use crate::effects::sequence::{SequenceHandle, StagedSequencePlayer};
use crate::error::EffectError;
use crate::event::{EffectEvent, EventDispatcher};
use crate::ids::NodeId;
use crate::schedule::{FramePhase, TimerScheduler};
use crate::stage::Stage;
use crate::time::{EffectTime, TimeRange};

const SPLASH_EASING: &str = "cubic-bezier";

/// Splash lifecycle. Dismissal may interrupt filling; nothing ever goes
/// backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplashState {
    Idle,
    Filling,
    Dismissing,
}

impl SplashState {
    pub fn name(&self) -> &'static str {
        match self {
            SplashState::Idle => "idle",
            SplashState::Filling => "filling",
            SplashState::Dismissing => "dismissing",
        }
    }
}

/// Loading overlay with an eased progress bar and a timed dismissal.
///
/// The fill animation and the dismissal are independent: the host reports
/// readiness whenever it likes, and a dismissal started mid-fill simply
/// fades the overlay out while the bar keeps going underneath.
pub struct SplashScreen {
    overlay: NodeId,
    bar: NodeId,
    state: SplashState,
    fill: EffectTime,
    hold: EffectTime,
    fade: EffectTime,
    sequence: Option<SequenceHandle>,
}

impl SplashScreen {
    pub fn new(overlay: NodeId, bar: NodeId, config: &OrchestratorConfig) -> Self {
        Self {
            overlay,
            bar,
            state: SplashState::Idle,
            fill: config.splash_fill,
            hold: config.splash_hold,
            fade: config.splash_fade,
            sequence: None,
        }
    }

    #[inline]
    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    #[inline]
    pub fn bar(&self) -> NodeId {
        self.bar
    }

    #[inline]
    pub fn state(&self) -> SplashState {
        self.state
    }

    /// Handle for the dismissal sequence once `dismiss` has been called.
    #[inline]
    pub fn sequence(&self) -> Option<&SequenceHandle> {
        self.sequence.as_ref()
    }

    /// The overlay is gone once the dismissal sequence has removed it from
    /// the stage.
    pub fn is_dismissed(&self, stage: &Stage) -> bool {
        !stage.contains(self.overlay)
    }

    /// Begin filling the progress bar. Only valid from idle.
    pub fn start(
        &mut self,
        scheduler: &mut TimerScheduler,
        stage: &mut Stage,
    ) -> Result<(), EffectError> {
        if self.state != SplashState::Idle {
            return Err(EffectError::InvalidStateTransition {
                current: self.state.name().to_string(),
                requested: SplashState::Filling.name().to_string(),
            });
        }
        stage.node(self.overlay)?;
        stage.node(self.bar)?;
        self.state = SplashState::Filling;

        let bar = self.bar;
        let fill = self.fill;
        let range = TimeRange::from_duration(fill);
        let mut begin: Option<EffectTime> = None;
        scheduler.request_frame(move |ctx, now| {
            let begin = *begin.get_or_insert(now);
            // A collapsed fill still writes the bar once, at full.
            let progress = if fill == EffectTime::zero() {
                1.0
            } else {
                range.normalize_time(now.sub(begin))
            };
            let eased = ctx.easings.apply(SPLASH_EASING, progress)?;
            match ctx.stage.node_mut(bar) {
                Ok(entry) => entry.progress = eased,
                Err(_) => {
                    warn!("splash bar {:?} removed mid-fill", bar);
                    return Ok(FramePhase::Done);
                }
            }
            if progress >= 1.0 {
                Ok(FramePhase::Done)
            } else {
                Ok(FramePhase::Continue)
            }
        });
        Ok(())
    }

    /// Fade the overlay out and remove it: hold, drop opacity, then take the
    /// overlay off the stage and emit `SplashDismissed`.
    pub fn dismiss(
        &mut self,
        scheduler: &mut TimerScheduler,
        events: &mut EventDispatcher,
    ) -> Result<(), EffectError> {
        if self.state == SplashState::Dismissing {
            return Err(EffectError::InvalidStateTransition {
                current: self.state.name().to_string(),
                requested: SplashState::Dismissing.name().to_string(),
            });
        }
        self.state = SplashState::Dismissing;

        let overlay = self.overlay;
        let sequence = StagedSequencePlayer::new()
            .with_step(self.hold, move |ctx| {
                ctx.stage.node_mut(overlay)?.opacity = 0.0;
                Ok(())
            })
            .with_step(self.hold.add(self.fade), move |ctx| {
                if ctx.stage.remove(overlay).is_none() {
                    debug!("splash overlay {:?} already removed", overlay);
                }
                ctx.events.emit(EffectEvent::SplashDismissed);
                Ok(())
            });
        self.sequence = Some(sequence.start(scheduler, events));
        Ok(())
    }
}
