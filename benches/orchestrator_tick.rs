use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use reveal_orchestrator::{
    EffectTime, Orchestrator, OrchestratorConfig, RegionKind, StagedSequencePlayer, VisualNode,
};

fn ms(value: u64) -> EffectTime {
    EffectTime::from_nanos(value * 1_000_000)
}

/// Orchestrator with a representative page mid-reveal: eight counters
/// animating, a twelve-card stagger queued, and a staged sequence running.
fn busy_orchestrator() -> Orchestrator {
    let mut orchestrator = Orchestrator::new(OrchestratorConfig::default());

    let stats = orchestrator.stage_mut().insert(VisualNode::new());
    let counters: Vec<_> = (0..8)
        .map(|i| {
            orchestrator
                .stage_mut()
                .insert(VisualNode::new().with_text(format!("{}", 100 + i)))
        })
        .collect();
    let region = orchestrator.observe(stats, RegionKind::CounterGroup { children: counters });
    orchestrator.intersection(region, true).unwrap();

    let grid = orchestrator.stage_mut().insert(VisualNode::new());
    let cards: Vec<_> = (0..12)
        .map(|_| orchestrator.stage_mut().insert(VisualNode::new()))
        .collect();
    let grid_region = orchestrator.observe(grid, RegionKind::StaggerGroup { children: cards });
    orchestrator.intersection(grid_region, true).unwrap();

    let mut player = StagedSequencePlayer::new();
    for i in 0..6u64 {
        player.push_step(ms(i * 50), |_ctx| Ok(()));
    }
    orchestrator.play_sequence(player);

    orchestrator
}

fn bench_update(c: &mut Criterion) {
    c.bench_function("busy_page_30_ticks", |b| {
        b.iter_batched(
            busy_orchestrator,
            |mut orchestrator| {
                for _ in 0..30 {
                    orchestrator.update(ms(16)).unwrap();
                }
                orchestrator
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("idle_30_ticks", |b| {
        b.iter_batched(
            || Orchestrator::new(OrchestratorConfig::default()),
            |mut orchestrator| {
                for _ in 0..30 {
                    orchestrator.update(ms(16)).unwrap();
                }
                orchestrator
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
