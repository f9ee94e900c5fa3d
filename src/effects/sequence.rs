use uuid::Uuid;

use crate::error::EffectError;
use crate::event::{EffectEvent, EventDispatcher};
use crate::ids::TimerId;
use crate::schedule::{EffectContext, TimerScheduler};
use crate::time::EffectTime;

type StepAction = Box<dyn FnOnce(&mut EffectContext<'_>) -> Result<(), EffectError>>;

struct Step {
    delay: EffectTime,
    action: StepAction,
}

/// Builder for a timed sequence of one-shot reveal steps.
///
/// Delays are all relative to the moment the sequence starts, mirroring a
/// block of staggered timer registrations. Steps may share a delay; ties
/// fire in registration order.
pub struct StagedSequencePlayer {
    id: String,
    steps: Vec<Step>,
}

impl StagedSequencePlayer {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            steps: Vec::new(),
        }
    }

    /// Stable identifier carried by every event this sequence emits.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Add a step, builder style.
    pub fn with_step<F>(mut self, delay: EffectTime, action: F) -> Self
    where
        F: FnOnce(&mut EffectContext<'_>) -> Result<(), EffectError> + 'static,
    {
        self.push_step(delay, action);
        self
    }

    pub fn push_step<F>(&mut self, delay: EffectTime, action: F)
    where
        F: FnOnce(&mut EffectContext<'_>) -> Result<(), EffectError> + 'static,
    {
        self.steps.push(Step {
            delay,
            action: Box::new(action),
        });
    }

    /// Arm every step on the scheduler and consume the player.
    ///
    /// `SequenceStarted` is emitted immediately. Each step emits
    /// `SequenceStep` before its action runs, and the step with the
    /// greatest delay emits `SequenceCompleted` whether or not its action
    /// succeeded, so downstream listeners always see the sequence finish.
    /// An empty sequence completes at once.
    pub fn start(
        self,
        scheduler: &mut TimerScheduler,
        events: &mut EventDispatcher,
    ) -> SequenceHandle {
        let id = self.id;
        events.emit(EffectEvent::SequenceStarted {
            sequence: id.clone(),
        });

        if self.steps.is_empty() {
            events.emit(EffectEvent::SequenceCompleted {
                sequence: id.clone(),
            });
            return SequenceHandle {
                id,
                timers: Vec::new(),
            };
        }

        let last = self
            .steps
            .iter()
            .enumerate()
            .max_by_key(|(index, step)| (step.delay, *index))
            .map(|(index, _)| index)
            .unwrap_or(0);

        let mut timers = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.into_iter().enumerate() {
            let Step { delay, action } = step;
            let sequence = id.clone();
            let is_last = index == last;
            let timer = scheduler.schedule(delay, move |ctx| {
                ctx.events.emit(EffectEvent::SequenceStep {
                    sequence: sequence.clone(),
                    index,
                });
                let result = action(ctx);
                if is_last {
                    ctx.events.emit(EffectEvent::SequenceCompleted { sequence });
                }
                result
            });
            timers.push(timer);
        }

        SequenceHandle { id, timers }
    }
}

impl Default for StagedSequencePlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Disposal handle for a started sequence.
#[derive(Debug, Clone)]
pub struct SequenceHandle {
    id: String,
    timers: Vec<TimerId>,
}

impl SequenceHandle {
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Timers still referenced by this handle. Cancellation of timers that
    /// already fired is a no-op, so this is an upper bound.
    #[inline]
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Cancel every step that has not fired yet. Returns how many pending
    /// timers were actually removed.
    pub fn cancel(self, scheduler: &mut TimerScheduler) -> usize {
        self.timers
            .into_iter()
            .filter(|timer| scheduler.cancel_timer(*timer))
            .count()
    }
}
