//! Integration tests for value counters

use reveal_orchestrator::{
    EasingRegistry, EffectContext, EffectError, EffectEvent, EffectTime, EventDispatcher,
    NullNavigator, OrchestratorConfig, Stage, TickStats, TimerScheduler, ValueCounter, VisualNode,
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
fn test_counts_up_and_lands_exactly_on_target() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new().with_text("0"));

    let mut counter = ValueCounter::new(node, 247);
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();
    assert_eq!(scheduler.active_frames(), 1);

    // The count measures elapsed time from its first frame; a zero advance
    // anchors it at t = 0.
    world.advance(&mut scheduler, EffectTime::zero());

    let mut displayed = Vec::new();
    // 94 ticks of 16ms pass the 1500ms duration.
    for _ in 0..94 {
        world.advance(&mut scheduler, ms(16));
        displayed.push(world.stage.node(node).unwrap().text.parse::<i64>().unwrap());
    }

    // Monotone, never overshooting, exact at the end.
    for pair in displayed.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert!(displayed.iter().all(|v| (0..=247).contains(v)));
    // The eased value just before the end floors to 246, not 247.
    assert_eq!(displayed[displayed.len() - 2], 246);
    assert_eq!(world.stage.node(node).unwrap().text, "247");
    assert_eq!(scheduler.active_frames(), 0);

    let events = world.events.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::CounterStarted { target: 247, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::CounterFinished { value: 247, .. })));
}

#[test]
fn test_linear_midpoint() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new().with_text("0"));

    let mut counter = ValueCounter::new(node, 100)
        .with_duration(ms(1000))
        .with_easing("linear");
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();

    world.advance(&mut scheduler, EffectTime::zero());
    world.advance(&mut scheduler, ms(500));
    assert_eq!(world.stage.node(node).unwrap().text, "50");
}

#[test]
fn test_start_value_offset() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new().with_text("100"));

    let mut counter = ValueCounter::new(node, 200)
        .with_start_value(100)
        .with_duration(ms(1000))
        .with_easing("linear");
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();

    world.advance(&mut scheduler, EffectTime::zero());
    world.advance(&mut scheduler, ms(500));
    assert_eq!(world.stage.node(node).unwrap().text, "150");
    world.advance(&mut scheduler, ms(500));
    assert_eq!(world.stage.node(node).unwrap().text, "200");
}

#[test]
fn test_double_start_is_a_noop() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new().with_text("0"));

    let mut counter = ValueCounter::new(node, 10);
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();

    assert_eq!(scheduler.active_frames(), 1);
    let started = world
        .events
        .take_events()
        .iter()
        .filter(|e| matches!(e, EffectEvent::CounterStarted { .. }))
        .count();
    assert_eq!(started, 1);
}

#[test]
fn test_negative_target_is_rejected() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new());

    let mut counter = ValueCounter::new(node, -5);
    let result = counter.start(&mut scheduler, &mut world.stage, &mut world.events);
    assert!(matches!(result, Err(EffectError::InvalidValue { .. })));
    assert_eq!(scheduler.active_frames(), 0);
}

#[test]
fn test_missing_node_is_rejected() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new());
    world.stage.remove(node);

    let mut counter = ValueCounter::new(node, 10);
    let result = counter.start(&mut scheduler, &mut world.stage, &mut world.events);
    assert!(matches!(result, Err(EffectError::NodeNotFound { .. })));
}

#[test]
fn test_zero_duration_writes_target_immediately() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new().with_text("0"));

    let mut counter = ValueCounter::new(node, 42).with_duration(EffectTime::zero());
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();

    assert_eq!(world.stage.node(node).unwrap().text, "42");
    assert_eq!(scheduler.active_frames(), 0);

    let events = world.events.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::CounterStarted { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::CounterFinished { value: 42, .. })));
}

#[test]
fn test_node_removed_mid_flight_ends_quietly() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new().with_text("0"));

    let mut counter = ValueCounter::new(node, 100);
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();

    world.advance(&mut scheduler, ms(100));
    world.stage.remove(node);
    let stats = world.advance(&mut scheduler, ms(100));

    assert_eq!(stats.errors, 0);
    assert_eq!(scheduler.active_frames(), 0);
    let events = world.events.take_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, EffectEvent::CounterFinished { .. })));
}

#[test]
fn test_unknown_easing_fails_on_first_frame() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new().with_text("0"));

    let mut counter = ValueCounter::new(node, 100).with_easing("bounce");
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();

    let stats = world.advance(&mut scheduler, ms(16));
    assert_eq!(stats.errors, 1);
    assert_eq!(scheduler.active_frames(), 0);
    // The node text is untouched.
    assert_eq!(world.stage.node(node).unwrap().text, "0");
}

#[test]
fn test_stop_cancels_the_subscription() {
    let mut world = World::new();
    let mut scheduler = TimerScheduler::new();
    let node = world.stage.insert(VisualNode::new().with_text("0"));

    let mut counter = ValueCounter::new(node, 100).with_duration(ms(1000));
    counter
        .start(&mut scheduler, &mut world.stage, &mut world.events)
        .unwrap();
    world.advance(&mut scheduler, ms(100));

    assert!(counter.stop(&mut scheduler));
    assert!(!counter.stop(&mut scheduler));
    assert_eq!(scheduler.active_frames(), 0);

    let frozen = world.stage.node(node).unwrap().text.clone();
    world.advance(&mut scheduler, ms(500));
    assert_eq!(world.stage.node(node).unwrap().text, frozen);
}
