//! Integration tests for the staged sequence player

use std::cell::RefCell;
use std::rc::Rc;

use reveal_orchestrator::{
    EasingRegistry, EffectContext, EffectError, EffectEvent, EffectTime, EventDispatcher,
    NullNavigator, OrchestratorConfig, Stage, StagedSequencePlayer, TickStats, TimerScheduler,
};

fn ms(value: u64) -> EffectTime {
    EffectTime::from_nanos(value * 1_000_000)
}

struct World {
    stage: Stage,
    easings: EasingRegistry,
    events: EventDispatcher,
    navigator: NullNavigator,
    config: OrchestratorConfig,
}

impl World {
    fn new() -> Self {
        Self {
            stage: Stage::new(),
            easings: EasingRegistry::default(),
            events: EventDispatcher::new(),
            navigator: NullNavigator,
            config: OrchestratorConfig::default(),
        }
    }

    fn advance(&mut self, scheduler: &mut TimerScheduler, dt: EffectTime) -> TickStats {
        let mut ctx = EffectContext::new(
            &mut self.stage,
            &mut self.easings,
            &mut self.events,
            &mut self.navigator,
            &self.config,
        );
        scheduler.advance(dt, &mut ctx)
    }
}

#[test]
fn test_steps_fire_in_declared_stagger() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let mut player = StagedSequencePlayer::new();
    for step in 0..3u32 {
        let o = order.clone();
        player.push_step(ms(step as u64 * 100), move |ctx| {
            o.borrow_mut().push((step, ctx.now().as_millis()));
            Ok(())
        });
    }
    let sequence = player.id().to_string();
    player.start(&mut scheduler, &mut world.events);

    world.advance(&mut scheduler, ms(250));
    assert_eq!(*order.borrow(), vec![(0, 0.0), (1, 100.0), (2, 200.0)]);

    let events = world.events.take_events();
    assert!(matches!(
        &events[0],
        EffectEvent::SequenceStarted { sequence: s } if *s == sequence
    ));
    let steps: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            EffectEvent::SequenceStep { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(steps, vec![0, 1, 2]);
    assert!(matches!(
        events.last(),
        Some(EffectEvent::SequenceCompleted { sequence: s }) if *s == sequence
    ));
}

#[test]
fn test_empty_sequence_completes_immediately() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();

    let player = StagedSequencePlayer::new();
    assert!(player.is_empty());
    let handle = player.start(&mut scheduler, &mut world.events);
    assert_eq!(handle.timer_count(), 0);

    let events = world.events.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], EffectEvent::SequenceStarted { .. }));
    assert!(matches!(events[1], EffectEvent::SequenceCompleted { .. }));
}

#[test]
fn test_completion_follows_last_registered_on_delay_tie() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();

    let player = StagedSequencePlayer::new()
        .with_step(ms(100), |_| Ok(()))
        .with_step(ms(100), |_| Ok(()));
    player.start(&mut scheduler, &mut world.events);

    world.advance(&mut scheduler, ms(100));
    let events = world.events.take_events();

    let positions: Vec<usize> = events
        .iter()
        .enumerate()
        .filter_map(|(at, e)| match e {
            EffectEvent::SequenceStep { index: 1, .. } | EffectEvent::SequenceCompleted { .. } => {
                Some(at)
            }
            _ => None,
        })
        .collect();
    // Completion comes after the second step, never between the ties.
    assert_eq!(positions.len(), 2);
    assert!(positions[0] < positions[1]);
    assert!(matches!(
        events.last(),
        Some(EffectEvent::SequenceCompleted { .. })
    ));
}

#[test]
fn test_failing_step_does_not_block_later_steps() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let ran = Rc::new(RefCell::new(false));

    let r = ran.clone();
    let player = StagedSequencePlayer::new()
        .with_step(ms(0), |_| Err(EffectError::new("bad step")))
        .with_step(ms(50), move |_| {
            *r.borrow_mut() = true;
            Ok(())
        });
    player.start(&mut scheduler, &mut world.events);

    let stats = world.advance(&mut scheduler, ms(100));
    assert_eq!(stats.timers_fired, 2);
    assert_eq!(stats.errors, 1);
    assert!(*ran.borrow());

    let events = world.events.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::Error { source, .. } if source == "timer")));
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::SequenceCompleted { .. })));
}

#[test]
fn test_completion_fires_even_when_final_step_fails() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();

    let player = StagedSequencePlayer::new()
        .with_step(ms(0), |_| Ok(()))
        .with_step(ms(50), |_| Err(EffectError::new("last step broke")));
    player.start(&mut scheduler, &mut world.events);

    world.advance(&mut scheduler, ms(100));
    let events = world.events.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::SequenceCompleted { .. })));
}

#[test]
fn test_cancel_removes_pending_steps() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let count = Rc::new(RefCell::new(0u32));

    let mut player = StagedSequencePlayer::new();
    for step in 0..3u64 {
        let c = count.clone();
        player.push_step(ms(step * 100), move |_| {
            *c.borrow_mut() += 1;
            Ok(())
        });
    }
    let handle = player.start(&mut scheduler, &mut world.events);

    world.advance(&mut scheduler, ms(10));
    assert_eq!(*count.borrow(), 1);

    let cancelled = handle.cancel(&mut scheduler);
    assert_eq!(cancelled, 2);
    assert_eq!(scheduler.pending_timers(), 0);

    world.advance(&mut scheduler, ms(500));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_zero_delay_step_fires_on_a_zero_advance() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let ran = Rc::new(RefCell::new(false));

    let r = ran.clone();
    let player = StagedSequencePlayer::new().with_step(EffectTime::zero(), move |_| {
        *r.borrow_mut() = true;
        Ok(())
    });
    player.start(&mut scheduler, &mut world.events);

    world.advance(&mut scheduler, EffectTime::zero());
    assert!(*ran.borrow());
}
