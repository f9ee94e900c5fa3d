//! Visual state registry
//!
//! The stage replaces implicit document coupling: hosts register the
//! elements they want orchestrated and receive opaque NodeId handles;
//! effects mutate node state through those handles and never query
//! markup. Adapters diff or observe the stage to style real elements.

pub mod node;

pub use node::*;

use std::collections::HashMap;

use crate::error::EffectError;
use crate::ids::{IdAllocator, NodeId};

/// Registry of visual nodes plus the stage-wide root state
#[derive(Debug, Default)]
pub struct Stage {
    nodes: HashMap<NodeId, VisualNode>,
    root: StageRoot,
    ids: IdAllocator,
}

impl Stage {
    /// Create an empty stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node and return its handle
    pub fn insert(&mut self, node: VisualNode) -> NodeId {
        let id = self.ids.alloc_node();
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node. Returns its final state if it was present.
    pub fn remove(&mut self, id: NodeId) -> Option<VisualNode> {
        self.nodes.remove(&id)
    }

    /// Get a node, failing if it has been removed
    #[inline]
    pub fn node(&self, id: NodeId) -> Result<&VisualNode, EffectError> {
        self.nodes
            .get(&id)
            .ok_or(EffectError::NodeNotFound { id })
    }

    /// Get a mutable node, failing if it has been removed
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut VisualNode, EffectError> {
        self.nodes
            .get_mut(&id)
            .ok_or(EffectError::NodeNotFound { id })
    }

    /// Peek at a node without an error path
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(&id)
    }

    /// Check whether a node is still registered
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Stage-wide root state
    #[inline]
    pub fn root(&self) -> &StageRoot {
        &self.root
    }

    /// Mutable stage-wide root state
    #[inline]
    pub fn root_mut(&mut self) -> &mut StageRoot {
        &mut self.root
    }

    /// Number of registered nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the stage has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all registered nodes
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &VisualNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }
}
