use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::OrchestratorConfig;
use crate::effects::counter::ValueCounter;
use crate::error::EffectError;
use crate::event::{EffectEvent, EventDispatcher};
use crate::ids::{IdAllocator, NodeId, RegionId};
use crate::schedule::TimerScheduler;
use crate::stage::Stage;
use crate::time::EffectTime;

/// Lifecycle of an observed region. Reveals are monotone: once revealed a
/// region never returns to pending, no matter what the host reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionState {
    Pending,
    Revealed,
}

impl RegionState {
    pub fn name(&self) -> &'static str {
        match self {
            RegionState::Pending => "pending",
            RegionState::Revealed => "revealed",
        }
    }

    #[inline]
    pub fn is_revealed(&self) -> bool {
        matches!(self, RegionState::Revealed)
    }
}

/// What happens to a region's contents when it scrolls into view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionKind {
    /// Just flip the container's revealed flag.
    Plain,
    /// Start a value counter on each child whose text parses as an integer.
    CounterGroup { children: Vec<NodeId> },
    /// Reveal children one by one on a fixed stagger interval.
    StaggerGroup { children: Vec<NodeId> },
}

#[derive(Debug)]
struct RevealRegion {
    node: NodeId,
    kind: RegionKind,
    state: RegionState,
}

/// Tracks which stage regions have scrolled into view and triggers their
/// reveal behavior exactly once.
///
/// The host owns the actual geometry; it reports either a boolean
/// intersection or a visibility ratio, and the observer applies the
/// configured threshold. Exit reports are ignored entirely.
#[derive(Debug)]
pub struct RevealObserver {
    regions: HashMap<RegionId, RevealRegion>,
    ids: IdAllocator,
    threshold: f64,
    margin: f64,
}

impl RevealObserver {
    pub fn new(config: &OrchestratorConfig) -> Self {
        Self {
            regions: HashMap::new(),
            ids: IdAllocator::new(),
            threshold: config.reveal_threshold,
            margin: config.reveal_margin,
        }
    }

    /// Register a region for observation. The node is the region's container
    /// on the stage.
    pub fn observe(&mut self, node: NodeId, kind: RegionKind) -> RegionId {
        let id = self.ids.alloc_region();
        self.regions.insert(
            id,
            RevealRegion {
                node,
                kind,
                state: RegionState::Pending,
            },
        );
        id
    }

    /// Visibility ratio the host should consider "visible".
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Extra margin, in host units, the observer asks the host to apply
    /// around the viewport when computing intersections.
    #[inline]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    #[inline]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn is_revealed(&self, region: RegionId) -> Result<bool, EffectError> {
        self.regions
            .get(&region)
            .map(|entry| entry.state.is_revealed())
            .ok_or(EffectError::RegionNotFound { id: region })
    }

    /// Host callback with a precomputed intersection flag.
    pub fn intersection(
        &mut self,
        region: RegionId,
        is_intersecting: bool,
        scheduler: &mut TimerScheduler,
        stage: &mut Stage,
        events: &mut EventDispatcher,
        config: &OrchestratorConfig,
    ) -> Result<(), EffectError> {
        let entry = self
            .regions
            .get_mut(&region)
            .ok_or(EffectError::RegionNotFound { id: region })?;
        if !is_intersecting {
            return Ok(());
        }
        if entry.state.is_revealed() {
            debug!("region {:?} already revealed, ignoring", region);
            return Ok(());
        }

        stage.node_mut(entry.node)?.revealed = true;
        entry.state = RegionState::Revealed;
        events.emit(EffectEvent::RegionRevealed { region });

        match &entry.kind {
            RegionKind::Plain => {}
            RegionKind::CounterGroup { children } => {
                for child in children {
                    let text = match stage.node(*child) {
                        Ok(node) => node.text.clone(),
                        Err(_) => {
                            debug!("counter child {:?} missing, skipping", child);
                            continue;
                        }
                    };
                    let target = match text.trim().parse::<i64>() {
                        Ok(value) => value,
                        Err(_) => {
                            debug!("counter child {:?} text {:?} is not a number", child, text);
                            continue;
                        }
                    };
                    if config.reduced_motion {
                        if let Ok(node) = stage.node_mut(*child) {
                            node.text = target.to_string();
                            events.emit(EffectEvent::CounterStarted {
                                node: *child,
                                target,
                            });
                            events.emit(EffectEvent::CounterFinished {
                                node: *child,
                                value: target,
                            });
                        }
                        continue;
                    }
                    let mut counter = ValueCounter::new(*child, target)
                        .with_duration(config.counter_duration)
                        .with_easing(config.counter_easing.clone());
                    if let Err(err) = counter.start(scheduler, stage, events) {
                        warn!("counter for node {:?} failed to start: {}", child, err);
                    }
                }
            }
            RegionKind::StaggerGroup { children } => {
                for (index, child) in children.iter().enumerate() {
                    let delay = EffectTime::from_nanos(
                        config.stagger_interval.as_nanos().saturating_mul(index as u64),
                    );
                    let child = *child;
                    scheduler.schedule(delay, move |ctx| {
                        ctx.stage.node_mut(child)?.revealed = true;
                        ctx.events.emit(EffectEvent::ChildRevealed {
                            region,
                            node: child,
                            index,
                        });
                        Ok(())
                    });
                }
            }
        }
        Ok(())
    }

    /// Host callback with a raw visibility ratio; the configured threshold
    /// decides whether it counts as an intersection.
    pub fn intersection_ratio(
        &mut self,
        region: RegionId,
        ratio: f64,
        scheduler: &mut TimerScheduler,
        stage: &mut Stage,
        events: &mut EventDispatcher,
        config: &OrchestratorConfig,
    ) -> Result<(), EffectError> {
        let is_intersecting = ratio >= self.threshold;
        self.intersection(region, is_intersecting, scheduler, stage, events, config)
    }
}
