//! Depth-first enumeration of everything reachable from a node or action.

use std::collections::{HashMap, HashSet};

use crate::pack::error::{PackError, Result};
use crate::pack::graph::{ActionKey, NodeKey, StoryGraph};
use crate::pack::ids::{ActionId, NodeId};

/// Nodes and actions in first-visit order.
///
/// Each entity appears once no matter how many paths reach it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    pub nodes: Vec<NodeKey>,
    pub actions: Vec<ActionKey>,
}

struct Walker<'g> {
    graph: &'g StoryGraph,
    seen_nodes: HashSet<NodeKey>,
    seen_actions: HashSet<ActionKey>,
    node_ids: HashMap<NodeId, NodeKey>,
    action_ids: HashMap<ActionId, ActionKey>,
    out: Traversal,
}

impl<'g> Walker<'g> {
    fn new(graph: &'g StoryGraph) -> Self {
        Self {
            graph,
            seen_nodes: HashSet::new(),
            seen_actions: HashSet::new(),
            node_ids: HashMap::new(),
            action_ids: HashMap::new(),
            out: Traversal::default(),
        }
    }

    fn visit_node(&mut self, key: NodeKey) -> Result<()> {
        if !self.seen_nodes.insert(key) {
            return Ok(());
        }
        let graph = self.graph;
        let node = graph.node(key);
        if self.node_ids.insert(node.id(), key).is_some() {
            return Err(PackError::DuplicateId(node.id().to_string()));
        }
        self.out.nodes.push(key);

        for action in [node.ok_action(), node.home_action()].into_iter().flatten() {
            self.visit_action(action)?;
        }
        Ok(())
    }

    fn visit_action(&mut self, key: ActionKey) -> Result<()> {
        if !self.seen_actions.insert(key) {
            return Ok(());
        }
        let graph = self.graph;
        let action = graph.action(key);
        if self.action_ids.insert(action.id(), key).is_some() {
            return Err(PackError::DuplicateId(action.id().to_string()));
        }
        self.out.actions.push(key);

        for &option in action.options() {
            self.visit_node(option)?;
        }
        Ok(())
    }
}

impl StoryGraph {
    /// Everything reachable from `start`, the start node first.
    ///
    /// Fails with [`PackError::DuplicateId`] if two distinct entities carry
    /// the same id.
    pub fn traverse_from_node(&self, start: impl Into<NodeKey>) -> Result<Traversal> {
        let mut walker = Walker::new(self);
        walker.visit_node(start.into())?;
        Ok(walker.out)
    }

    pub fn traverse_from_action(&self, start: ActionKey) -> Result<Traversal> {
        let mut walker = Walker::new(self);
        walker.visit_action(start)?;
        Ok(walker.out)
    }

    pub fn enumerate_nodes(&self, start: impl Into<NodeKey>) -> Result<Vec<NodeKey>> {
        Ok(self.traverse_from_node(start)?.nodes)
    }

    pub fn enumerate_actions(&self, start: impl Into<NodeKey>) -> Result<Vec<ActionKey>> {
        Ok(self.traverse_from_node(start)?.actions)
    }
}
