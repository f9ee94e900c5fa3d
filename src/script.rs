//! Typing script definitions and JSON loading
//!
//! A typing script is an authored list of lines that appear one by one with
//! a short typing pulse on each. Scripts arrive as JSON in the host's
//! camelCase shape and compile into stage nodes plus a staged sequence.

use log::debug;
use serde::Deserialize;

use crate::effects::sequence::StagedSequencePlayer;
use crate::error::EffectError;
use crate::ids::NodeId;
use crate::stage::{Stage, VisualNode};
use crate::time::EffectTime;

#[derive(Deserialize)]
struct TypingScriptLine {
    text: String,
    #[serde(rename = "delayMs")]
    delay_ms: u64,
}

#[derive(Deserialize)]
struct TypingScriptData {
    #[serde(default)]
    name: String,
    lines: Vec<TypingScriptLine>,
}

/// One line of a typing script. The delay is relative to sequence start.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub text: String,
    pub delay: EffectTime,
}

/// An ordered typing script ready to compile against a stage.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingScript {
    pub name: String,
    lines: Vec<ScriptLine>,
}

impl TypingScript {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, text: impl Into<String>, delay: EffectTime) -> Self {
        self.lines.push(ScriptLine {
            text: text.into(),
            delay,
        });
        self
    }

    #[inline]
    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Materialize the script: insert one hidden node per line and build the
    /// sequence that reveals them.
    ///
    /// Each step unhides its line and raises the typing flag, then lowers it
    /// again `pulse` later. The returned nodes are in line order.
    pub fn compile(
        &self,
        stage: &mut Stage,
        pulse: EffectTime,
    ) -> (Vec<NodeId>, StagedSequencePlayer) {
        let mut nodes = Vec::with_capacity(self.lines.len());
        let mut player = StagedSequencePlayer::new();
        for line in &self.lines {
            let node = stage.insert(
                VisualNode::new()
                    .with_text(line.text.clone())
                    .with_hidden(true),
            );
            nodes.push(node);
            player.push_step(line.delay, move |ctx| {
                let entry = ctx.stage.node_mut(node)?;
                entry.hidden = false;
                entry.typing = true;
                ctx.schedule(pulse, move |ctx| {
                    match ctx.stage.node_mut(node) {
                        Ok(entry) => entry.typing = false,
                        Err(_) => debug!("typing line {:?} gone before pulse ended", node),
                    }
                    Ok(())
                });
                Ok(())
            });
        }
        (nodes, player)
    }
}

/// Load a typing script from the host's JSON shape.
pub fn load_typing_script_from_json(json: &str) -> Result<TypingScript, EffectError> {
    let data: TypingScriptData = serde_json::from_str(json)?;
    let lines = data
        .lines
        .into_iter()
        .map(|line| ScriptLine {
            text: line.text,
            delay: EffectTime::from_nanos(line.delay_ms.saturating_mul(1_000_000)),
        })
        .collect();
    Ok(TypingScript {
        name: data.name,
        lines,
    })
}
