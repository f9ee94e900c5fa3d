//! Semantic events emitted by the effect components
//!
//! Events carry only ids and plain values so adapters can transport them
//! across host boundaries. Hosts either drain the per-tick buffer through
//! the TickReport or subscribe listener callbacks with disposal tokens.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{NodeId, RegionId};
use crate::theme::Theme;

/// Discrete semantic signals emitted while effects run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EffectEvent {
    SequenceStarted {
        sequence: String,
    },
    SequenceStep {
        sequence: String,
        index: usize,
    },
    SequenceCompleted {
        sequence: String,
    },
    CounterStarted {
        node: NodeId,
        target: i64,
    },
    CounterFinished {
        node: NodeId,
        value: i64,
    },
    RegionRevealed {
        region: RegionId,
    },
    ChildRevealed {
        region: RegionId,
        node: NodeId,
        index: usize,
    },
    ThemeChanged {
        theme: Theme,
        explicit: bool,
    },
    RippleSpawned {
        host: NodeId,
        overlay: NodeId,
    },
    RippleExpired {
        overlay: NodeId,
    },
    NavigationRequested {
        url: String,
        target: String,
    },
    SplashDismissed,
    PerformanceWarning {
        metric: String,
        value: f64,
        threshold: f64,
    },
    Error {
        source: String,
        message: String,
    },
}

/// Dispatcher fanning events out to subscribed listeners and a per-tick
/// buffer drained by the orchestrator.
pub struct EventDispatcher {
    listeners: HashMap<String, Box<dyn FnMut(&EffectEvent)>>,
    buffer: Vec<EffectEvent>,
}

impl EventDispatcher {
    /// Create a new dispatcher
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            buffer: Vec::new(),
        }
    }

    /// Subscribe a listener. Returns a token used to unsubscribe.
    pub fn subscribe(&mut self, listener: impl FnMut(&EffectEvent) + 'static) -> String {
        let token = Uuid::new_v4().to_string();
        self.listeners.insert(token.clone(), Box::new(listener));
        token
    }

    /// Remove a listener by its token
    pub fn unsubscribe(&mut self, token: &str) -> bool {
        self.listeners.remove(token).is_some()
    }

    /// Emit an event to every listener and buffer it for the next drain
    pub fn emit(&mut self, event: EffectEvent) {
        for listener in self.listeners.values_mut() {
            listener(&event);
        }
        self.buffer.push(event);
    }

    /// Drain the buffered events
    #[inline]
    pub fn take_events(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.buffer)
    }

    /// Peek at the buffered events without draining them
    #[inline]
    pub fn pending(&self) -> &[EffectEvent] {
        &self.buffer
    }

    /// Number of subscribed listeners
    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
