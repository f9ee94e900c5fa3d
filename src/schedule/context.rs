use crate::config::OrchestratorConfig;
use crate::easing::EasingRegistry;
use crate::effects::interaction::Navigator;
use crate::error::EffectError;
use crate::event::EventDispatcher;
use crate::schedule::scheduler::{FrameCallback, FramePhase, TimerAction};
use crate::stage::Stage;
use crate::time::EffectTime;

/// Deferred scheduling request raised by a callback mid-tick.
///
/// Deadlines are absolute so a chained timer fires relative to the moment
/// its parent fired, not to the end of the enclosing advance.
pub(crate) enum ScheduleCommand {
    Timer {
        deadline: EffectTime,
        action: TimerAction,
    },
    Frame {
        callback: FrameCallback,
    },
}

/// Mutable view of the orchestrator handed to every timer and frame callback.
///
/// The context borrows the world for exactly one advance. Callbacks that need
/// more work later queue it here; the scheduler absorbs the queue between
/// passes, so a timer scheduled from a timer can still fire in the same tick
/// when its deadline has already passed.
pub struct EffectContext<'a> {
    pub stage: &'a mut Stage,
    pub easings: &'a mut EasingRegistry,
    pub events: &'a mut EventDispatcher,
    pub navigator: &'a mut dyn Navigator,
    pub config: &'a OrchestratorConfig,
    now: EffectTime,
    queue: Vec<ScheduleCommand>,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        stage: &'a mut Stage,
        easings: &'a mut EasingRegistry,
        events: &'a mut EventDispatcher,
        navigator: &'a mut dyn Navigator,
        config: &'a OrchestratorConfig,
    ) -> Self {
        Self {
            stage,
            easings,
            events,
            navigator,
            config,
            now: EffectTime::zero(),
            queue: Vec::new(),
        }
    }

    /// Logical time of the callback currently running. While a timer fires
    /// this is the timer's deadline, not the end of the tick.
    #[inline]
    pub fn now(&self) -> EffectTime {
        self.now
    }

    #[inline]
    pub(crate) fn set_now(&mut self, now: EffectTime) {
        self.now = now;
    }

    /// Queue a one-shot timer relative to the current logical time.
    ///
    /// Fire-and-forget: cancellation handles are only available from the
    /// scheduler's own API, outside a tick.
    pub fn schedule<F>(&mut self, delay: EffectTime, action: F)
    where
        F: FnOnce(&mut EffectContext<'_>) -> Result<(), EffectError> + 'static,
    {
        let deadline = self.now.add(delay);
        self.queue.push(ScheduleCommand::Timer {
            deadline,
            action: Box::new(action),
        });
    }

    /// Queue a per-frame callback. Frames queued from a timer join the
    /// current tick's frame pass; frames queued from a frame start next tick.
    pub fn request_frame<F>(&mut self, callback: F)
    where
        F: FnMut(&mut EffectContext<'_>, EffectTime) -> Result<FramePhase, EffectError> + 'static,
    {
        self.queue.push(ScheduleCommand::Frame {
            callback: Box::new(callback),
        });
    }

    /// Number of queued commands not yet absorbed by the scheduler.
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn take_queue(&mut self) -> Vec<ScheduleCommand> {
        std::mem::take(&mut self.queue)
    }
}
