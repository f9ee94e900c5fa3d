use log::warn;

use crate::error::EffectError;
use crate::event::EffectEvent;
use crate::ids::{FrameId, IdAllocator, TimerId};
use crate::schedule::context::{EffectContext, ScheduleCommand};
use crate::time::EffectTime;

/// Upper bound on chained timer passes inside a single advance. A chain this
/// deep means a callback is rescheduling itself with a zero or near-zero
/// delay; the remainder is deferred to the next tick instead of spinning.
const MAX_TIMER_PASSES: usize = 32;

/// Boxed one-shot timer body.
pub type TimerAction = Box<dyn FnOnce(&mut EffectContext<'_>) -> Result<(), EffectError>>;

/// Boxed per-frame callback body.
pub type FrameCallback =
    Box<dyn FnMut(&mut EffectContext<'_>, EffectTime) -> Result<FramePhase, EffectError>>;

/// What a frame callback wants to happen after it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Run again on the next tick.
    Continue,
    /// Subscription is finished; drop the callback.
    Done,
}

struct TimerEntry {
    id: TimerId,
    deadline: EffectTime,
    seq: u64,
    action: TimerAction,
}

struct FrameEntry {
    id: FrameId,
    callback: FrameCallback,
}

/// Counters for a single advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub timers_fired: u32,
    pub frames_run: u32,
    pub errors: u32,
}

/// Single-threaded timer and frame scheduler.
///
/// Time only moves inside `advance`. Due timers fire in deadline order with
/// scheduling order breaking ties, then every frame callback runs once at the
/// tick's final time. A callback that fails is logged, surfaced as an
/// `EffectEvent::Error`, and the tick keeps going; one broken effect never
/// stalls the rest of the page.
pub struct TimerScheduler {
    now: EffectTime,
    timers: Vec<TimerEntry>,
    frames: Vec<FrameEntry>,
    ids: IdAllocator,
    next_seq: u64,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            now: EffectTime::zero(),
            timers: Vec::new(),
            frames: Vec::new(),
            ids: IdAllocator::new(),
            next_seq: 0,
        }
    }

    /// Current logical time, i.e. the sum of all advanced deltas.
    #[inline]
    pub fn now(&self) -> EffectTime {
        self.now
    }

    #[inline]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub fn active_frames(&self) -> usize {
        self.frames.len()
    }

    /// Register a one-shot timer `delay` from now. The returned id stays
    /// valid until the timer fires or is cancelled.
    pub fn schedule<F>(&mut self, delay: EffectTime, action: F) -> TimerId
    where
        F: FnOnce(&mut EffectContext<'_>) -> Result<(), EffectError> + 'static,
    {
        let id = self.ids.alloc_timer();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(TimerEntry {
            id,
            deadline: self.now.add(delay),
            seq,
            action: Box::new(action),
        });
        id
    }

    /// Register a callback that runs once per advance until it returns
    /// `FramePhase::Done` or fails.
    pub fn request_frame<F>(&mut self, callback: F) -> FrameId
    where
        F: FnMut(&mut EffectContext<'_>, EffectTime) -> Result<FramePhase, EffectError> + 'static,
    {
        let id = self.ids.alloc_frame();
        self.frames.push(FrameEntry {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a pending timer. Returns false when the timer already fired
    /// or was never registered.
    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|entry| entry.id != id);
        self.timers.len() != before
    }

    /// Remove an active frame subscription.
    pub fn cancel_frame(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|entry| entry.id != id);
        self.frames.len() != before
    }

    /// Move time forward by `dt` and run everything that becomes due.
    pub fn advance(&mut self, dt: EffectTime, ctx: &mut EffectContext<'_>) -> TickStats {
        let mut stats = TickStats::default();
        self.now = self.now.add(dt);

        // Timer passes. Each pass collects every timer whose deadline has
        // been reached, fires them in (deadline, registration) order, then
        // absorbs the context queue so chained timers landing inside this
        // tick join the next pass.
        let mut passes = 0;
        loop {
            let mut due = Vec::new();
            let mut index = 0;
            while index < self.timers.len() {
                if self.timers[index].deadline <= self.now {
                    due.push(self.timers.swap_remove(index));
                } else {
                    index += 1;
                }
            }
            if due.is_empty() {
                break;
            }
            passes += 1;
            if passes > MAX_TIMER_PASSES {
                warn!(
                    "timer chain exceeded {} passes in one tick, deferring {} timers",
                    MAX_TIMER_PASSES,
                    due.len()
                );
                self.timers.extend(due);
                break;
            }
            due.sort_by_key(|entry| (entry.deadline, entry.seq));
            for entry in due {
                ctx.set_now(entry.deadline);
                stats.timers_fired += 1;
                if let Err(err) = (entry.action)(ctx) {
                    stats.errors += 1;
                    warn!("timer {:?} failed ({}): {}", entry.id, err.category(), err);
                    ctx.events.emit(EffectEvent::Error {
                        source: "timer".to_string(),
                        message: err.to_string(),
                    });
                }
            }
            self.absorb(ctx);
        }

        // Frame pass. Every subscription sees the tick's final time exactly
        // once; frames queued by this tick's timers are already in the list.
        ctx.set_now(self.now);
        let entries = std::mem::take(&mut self.frames);
        let mut kept = Vec::with_capacity(entries.len());
        for mut entry in entries {
            stats.frames_run += 1;
            match (entry.callback)(ctx, self.now) {
                Ok(FramePhase::Continue) => kept.push(entry),
                Ok(FramePhase::Done) => {}
                Err(err) => {
                    stats.errors += 1;
                    warn!("frame {:?} failed ({}): {}", entry.id, err.category(), err);
                    ctx.events.emit(EffectEvent::Error {
                        source: "frame".to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }
        self.frames = kept;

        // Work queued during the frame pass starts on the next tick, which
        // is what a host frame callback would expect from a new request.
        self.absorb(ctx);

        stats
    }

    fn absorb(&mut self, ctx: &mut EffectContext<'_>) {
        for command in ctx.take_queue() {
            match command {
                ScheduleCommand::Timer { deadline, action } => {
                    let id = self.ids.alloc_timer();
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    self.timers.push(TimerEntry {
                        id,
                        deadline,
                        seq,
                        action,
                    });
                }
                ScheduleCommand::Frame { callback } => {
                    let id = self.ids.alloc_frame();
                    self.frames.push(FrameEntry { id, callback });
                }
            }
        }
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}
