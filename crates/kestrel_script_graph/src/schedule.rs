// SPDX-License-Identifier: MIT OR Apache-2.0
//! Topological scheduling over the data subgraph.
//!
//! The schedule is a total order over nodes computed with Kahn's algorithm
//! using only data edges; exec edges never constrain it. Nodes that take part
//! in no data dependency still appear (in-degree zero). The order is cached
//! and invalidated by every connect/disconnect/remove, then recomputed lazily
//! the next time it is consulted.

use crate::graph::ScriptGraph;
use crate::node::NodeId;
use crate::pin::PinKind;
use std::collections::{HashMap, VecDeque};

/// Cached topological order plus its dirty flag
#[derive(Debug, Default)]
pub(crate) struct Schedule {
    pub(crate) order: Vec<NodeId>,
    pub(crate) dirty: bool,
}

impl ScriptGraph {
    /// Invalidate the cached topological order
    pub fn mark_schedule_dirty(&mut self) {
        self.schedule.dirty = true;
    }

    /// Whether the cached order needs recomputation
    pub fn schedule_dirty(&self) -> bool {
        self.schedule.dirty
    }

    /// Nodes in data-dependency order, recomputing the cache if dirty
    pub fn topological_order(&mut self) -> &[NodeId] {
        if self.schedule.dirty {
            self.schedule.order = self.compute_topological_order();
            self.schedule.dirty = false;
        }
        &self.schedule.order
    }

    fn compute_topological_order(&self) -> Vec<NodeId> {
        let mut in_degree: HashMap<NodeId, usize> = HashMap::new();
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for id in self.node_ids() {
            in_degree.insert(id, 0);
            adjacency.insert(id, Vec::new());
        }

        // Only true data edges constrain the order
        for connection in self.connections() {
            if self.connection_kind(connection) != Some(PinKind::Data) {
                continue;
            }
            if !in_degree.contains_key(&connection.to_node) {
                continue;
            }
            *in_degree.entry(connection.to_node).or_insert(0) += 1;
            adjacency
                .entry(connection.from_node)
                .or_default()
                .push(connection.to_node);
        }

        let mut queue: VecDeque<NodeId> = self
            .node_ids()
            .filter(|id| in_degree.get(id) == Some(&0))
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());

        while let Some(current) = queue.pop_front() {
            order.push(current);
            if let Some(neighbors) = adjacency.get(&current) {
                for &neighbor in neighbors {
                    if let Some(degree) = in_degree.get_mut(&neighbor) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(neighbor);
                        }
                    }
                }
            }
        }

        tracing::trace!("computed topological order over {} node(s)", order.len());
        order
    }
}
