use log::debug;

use crate::config::OrchestratorConfig;
use crate::error::EffectError;
use crate::ids::NodeId;
use crate::schedule::Throttle;
use crate::stage::Stage;
use crate::time::EffectTime;

/// Scroll-linked stage updates: header condensing and a parallax layer.
///
/// Scroll input is throttled leading-edge, so a burst of host reports inside
/// one throttle window applies only the first offset.
#[derive(Debug, Default)]
pub struct ScrollEffects {
    parallax: Option<NodeId>,
    gate: Throttle,
}

impl ScrollEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node whose vertical offset tracks the scroll position.
    pub fn set_parallax(&mut self, node: NodeId) {
        self.parallax = Some(node);
    }

    pub fn clear_parallax(&mut self) {
        self.parallax = None;
    }

    #[inline]
    pub fn parallax(&self) -> Option<NodeId> {
        self.parallax
    }

    /// Apply one scroll report at the given offset.
    pub fn scroll(
        &mut self,
        offset: f64,
        now: EffectTime,
        stage: &mut Stage,
        config: &OrchestratorConfig,
    ) -> Result<(), EffectError> {
        if !self.gate.ready(now, config.scroll_throttle) {
            return Ok(());
        }
        stage.root_mut().header_condensed = offset > config.header_threshold;
        if let Some(node) = self.parallax {
            match stage.node_mut(node) {
                Ok(entry) => entry.offset_y = offset * config.parallax_rate,
                Err(_) => debug!("parallax node {:?} missing, skipping", node),
            }
        }
        Ok(())
    }
}
