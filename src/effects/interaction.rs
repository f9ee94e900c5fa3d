use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::OrchestratorConfig;
use crate::error::EffectError;
use crate::event::{EffectEvent, EventDispatcher};
use crate::ids::NodeId;
use crate::schedule::{Throttle, TimerScheduler};
use crate::stage::{NodeBounds, Stage, TiltTransform, VisualNode};
use crate::time::EffectTime;

/// Host hook for following a link. The orchestrator never navigates on its
/// own; it asks the navigator and emits `NavigationRequested` so listeners
/// can observe what happened.
pub trait Navigator {
    fn open(&mut self, url: &str, target: &str);
}

/// Navigator that goes nowhere. The default until the host installs one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn open(&mut self, _url: &str, _target: &str) {}
}

/// Pointer input reported by the host, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Click { node: NodeId, x: f64, y: f64 },
    Move { node: NodeId, x: f64, y: f64 },
    Enter { node: NodeId },
    Leave { node: NodeId },
}

#[derive(Debug, Clone)]
struct NavigationBinding {
    url: String,
    target: String,
    hold: bool,
}

/// Per-node pointer embellishments: click ripples, hover tilt, hover glow,
/// and click-to-navigate bindings with an optional busy hold.
///
/// Nodes opt in individually. Pointer events for nodes with no registered
/// enhancement fall through untouched.
#[derive(Debug)]
pub struct InteractionEnhancer {
    ripple_hosts: HashSet<NodeId>,
    tilt_targets: HashSet<NodeId>,
    glow_targets: HashSet<NodeId>,
    nav_bindings: HashMap<NodeId, NavigationBinding>,
    tilt_gate: Throttle,
    tilt_throttle: Option<EffectTime>,
}

impl InteractionEnhancer {
    pub fn new(config: &OrchestratorConfig) -> Self {
        Self {
            ripple_hosts: HashSet::new(),
            tilt_targets: HashSet::new(),
            glow_targets: HashSet::new(),
            nav_bindings: HashMap::new(),
            tilt_gate: Throttle::new(),
            tilt_throttle: config.tilt_throttle,
        }
    }

    /// Spawn a ripple overlay on every click inside this node.
    pub fn enhance_ripple(&mut self, node: NodeId) {
        self.ripple_hosts.insert(node);
    }

    /// Tilt this node toward the pointer while it moves over it.
    pub fn enhance_tilt(&mut self, node: NodeId) {
        self.tilt_targets.insert(node);
    }

    /// Light the node up while the pointer is inside it.
    pub fn enhance_glow(&mut self, node: NodeId) {
        self.glow_targets.insert(node);
    }

    /// Navigate when the node is clicked. With `hold` the node first shows
    /// the configured busy label for the hold delay, then navigates and
    /// restores itself.
    pub fn bind_navigation(
        &mut self,
        node: NodeId,
        url: impl Into<String>,
        target: impl Into<String>,
        hold: bool,
    ) {
        self.nav_bindings.insert(
            node,
            NavigationBinding {
                url: url.into(),
                target: target.into(),
                hold,
            },
        );
    }

    /// Drop every enhancement registered for a node.
    pub fn remove(&mut self, node: NodeId) {
        self.ripple_hosts.remove(&node);
        self.tilt_targets.remove(&node);
        self.glow_targets.remove(&node);
        self.nav_bindings.remove(&node);
    }

    /// Route one pointer event through the registered enhancements.
    pub fn pointer(
        &mut self,
        event: PointerEvent,
        scheduler: &mut TimerScheduler,
        stage: &mut Stage,
        events: &mut EventDispatcher,
        navigator: &mut dyn Navigator,
        config: &OrchestratorConfig,
    ) -> Result<(), EffectError> {
        match event {
            PointerEvent::Click { node, x, y } => {
                let (bounds, disabled) = {
                    let entry = stage.node(node)?;
                    (entry.bounds, entry.disabled)
                };
                if disabled {
                    debug!("click on disabled node {:?} ignored", node);
                    return Ok(());
                }

                if self.ripple_hosts.contains(&node) {
                    // Square overlay sized to the host's larger dimension,
                    // centered on the click in host-local coordinates.
                    let size = bounds.width.max(bounds.height);
                    let overlay = stage.insert(VisualNode::new().with_bounds(NodeBounds::new(
                        x - bounds.x - size / 2.0,
                        y - bounds.y - size / 2.0,
                        size,
                        size,
                    )));
                    events.emit(EffectEvent::RippleSpawned {
                        host: node,
                        overlay,
                    });
                    scheduler.schedule(config.ripple_lifetime, move |ctx| {
                        if ctx.stage.remove(overlay).is_none() {
                            debug!("ripple overlay {:?} already gone", overlay);
                        }
                        ctx.events.emit(EffectEvent::RippleExpired { overlay });
                        Ok(())
                    });
                }

                if let Some(binding) = self.nav_bindings.get(&node) {
                    if binding.hold {
                        let url = binding.url.clone();
                        let target = binding.target.clone();
                        let previous = stage.node(node)?.text.clone();
                        {
                            let entry = stage.node_mut(node)?;
                            entry.text = config.busy_label.clone();
                            entry.disabled = true;
                        }
                        scheduler.schedule(config.hold_before_navigate, move |ctx| {
                            ctx.navigator.open(&url, &target);
                            match ctx.stage.node_mut(node) {
                                Ok(entry) => {
                                    entry.text = previous;
                                    entry.disabled = false;
                                }
                                Err(_) => {
                                    warn!("press target {:?} gone before restore", node);
                                }
                            }
                            ctx.events
                                .emit(EffectEvent::NavigationRequested { url, target });
                            Ok(())
                        });
                    } else {
                        navigator.open(&binding.url, &binding.target);
                        events.emit(EffectEvent::NavigationRequested {
                            url: binding.url.clone(),
                            target: binding.target.clone(),
                        });
                    }
                }
                Ok(())
            }
            PointerEvent::Move { node, x, y } => {
                if !self.tilt_targets.contains(&node) {
                    return Ok(());
                }
                if let Some(interval) = self.tilt_throttle {
                    if !self.tilt_gate.ready(scheduler.now(), interval) {
                        return Ok(());
                    }
                }
                let entry = stage.node_mut(node)?;
                let (cx, cy) = entry.bounds.center();
                entry.tilt = Some(TiltTransform {
                    rotate_x: (y - cy) / config.tilt_divisor,
                    rotate_y: (cx - x) / config.tilt_divisor,
                    perspective: config.tilt_perspective,
                });
                Ok(())
            }
            PointerEvent::Enter { node } => {
                if self.glow_targets.contains(&node) {
                    stage.node_mut(node)?.glow = true;
                }
                Ok(())
            }
            PointerEvent::Leave { node } => {
                if self.glow_targets.contains(&node) {
                    stage.node_mut(node)?.glow = false;
                }
                if self.tilt_targets.contains(&node) {
                    stage.node_mut(node)?.tilt = None;
                    self.tilt_gate.reset();
                }
                Ok(())
            }
        }
    }
}
