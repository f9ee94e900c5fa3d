use log::warn;

use crate::error::EffectError;
use crate::event::{EffectEvent, EventDispatcher};
use crate::ids::{FrameId, NodeId};
use crate::schedule::{FramePhase, TimerScheduler};
use crate::stage::Stage;
use crate::time::{EffectTime, TimeRange};

const DEFAULT_DURATION_MS: u64 = 1500;
const DEFAULT_EASING: &str = "ease-out-quartic";

/// Animates a node's text from a start value to a target value.
///
/// Intermediate values are the floor of the eased interpolation, so the
/// display only ever shows whole numbers; the final frame writes the exact
/// target regardless of easing rounding.
pub struct ValueCounter {
    node: NodeId,
    start_value: i64,
    target_value: i64,
    duration: EffectTime,
    easing: String,
    started: bool,
    frame: Option<FrameId>,
}

impl ValueCounter {
    pub fn new(node: NodeId, target_value: i64) -> Self {
        Self {
            node,
            start_value: 0,
            target_value,
            duration: EffectTime::from_nanos(DEFAULT_DURATION_MS * 1_000_000),
            easing: DEFAULT_EASING.to_string(),
            started: false,
            frame: None,
        }
    }

    pub fn with_start_value(mut self, start_value: i64) -> Self {
        self.start_value = start_value;
        self
    }

    pub fn with_duration(mut self, duration: EffectTime) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn target(&self) -> i64 {
        self.target_value
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Begin counting. Registers a frame subscription that runs until the
    /// target is reached.
    ///
    /// Calling start twice is a logged no-op rather than an error. A zero
    /// duration skips the animation and writes the target immediately.
    pub fn start(
        &mut self,
        scheduler: &mut TimerScheduler,
        stage: &mut Stage,
        events: &mut EventDispatcher,
    ) -> Result<(), EffectError> {
        if self.started {
            warn!("counter for node {:?} already started", self.node);
            return Ok(());
        }
        if self.target_value < 0 {
            return Err(EffectError::InvalidValue {
                reason: format!(
                    "counter target must be non-negative, got {}",
                    self.target_value
                ),
            });
        }
        stage.node(self.node)?;

        self.started = true;
        events.emit(EffectEvent::CounterStarted {
            node: self.node,
            target: self.target_value,
        });

        if self.duration == EffectTime::zero() {
            let target = self.target_value;
            stage.node_mut(self.node)?.text = target.to_string();
            events.emit(EffectEvent::CounterFinished {
                node: self.node,
                value: target,
            });
            return Ok(());
        }

        let node = self.node;
        let start_value = self.start_value;
        let target = self.target_value;
        let range = TimeRange::from_duration(self.duration);
        let easing = self.easing.clone();
        let mut begin: Option<EffectTime> = None;

        let frame = scheduler.request_frame(move |ctx, now| {
            let begin = *begin.get_or_insert(now);
            let progress = range.normalize_time(now.sub(begin));
            let eased = ctx.easings.apply(&easing, progress)?;

            let entry = match ctx.stage.node_mut(node) {
                Ok(entry) => entry,
                Err(_) => {
                    warn!("counter target {:?} removed mid-flight", node);
                    return Ok(FramePhase::Done);
                }
            };
            let displayed = if progress >= 1.0 {
                target
            } else {
                (start_value as f64 + (target - start_value) as f64 * eased).floor() as i64
            };
            entry.text = displayed.to_string();

            if progress >= 1.0 {
                ctx.events.emit(EffectEvent::CounterFinished {
                    node,
                    value: target,
                });
                Ok(FramePhase::Done)
            } else {
                Ok(FramePhase::Continue)
            }
        });
        self.frame = Some(frame);
        Ok(())
    }

    /// Tear down the frame subscription without finishing the count.
    /// Returns false when the counter already completed or never started.
    pub fn stop(&mut self, scheduler: &mut TimerScheduler) -> bool {
        match self.frame.take() {
            Some(frame) => scheduler.cancel_frame(frame),
            None => false,
        }
    }
}
