// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pull-based data-dependency resolution.
//!
//! Two entry points keep data inputs fresh:
//!
//! - [`ScriptGraph::force_update_all_inputs`] walks the cached topological
//!   order, pulls values across every incoming data edge, and eagerly runs
//!   pure-data nodes so the whole graph holds a consistent snapshot. Used
//!   after wiring changes and at the start of each execution pass.
//! - [`ScriptGraph::evaluate_data_dependencies`] is the just-in-time variant
//!   run right before a node's body executes: a depth-first, visited-set
//!   memoized walk that refreshes only the upstream data cone of that node.

use crate::connection::Connection;
use crate::graph::ScriptGraph;
use crate::node::NodeId;
use crate::pin::PinKind;
use std::collections::HashSet;

impl ScriptGraph {
    /// Pull connected values and eagerly evaluate pure-data nodes across the
    /// whole graph, in topological order.
    pub fn force_update_all_inputs(&mut self) {
        let order = self.topological_order().to_vec();
        for id in order {
            self.update_node_inputs(id);
            let eager = self
                .node(id)
                .is_some_and(|n| n.pure_data && n.body.is_some());
            if eager {
                self.invoke_body(id);
                self.propagate_node_outputs(id);
            }
        }
    }

    /// Copy the current source output value across every data edge arriving
    /// at `node_id`. Dangling edges and out-of-range pins are skipped.
    pub fn update_node_inputs(&mut self, node_id: NodeId) {
        let updates: Vec<(usize, crate::Value)> = self
            .incoming(node_id)
            .filter(|c| self.connection_kind(c) == Some(PinKind::Data))
            .filter_map(|c| {
                let target = self.node(node_id)?;
                if c.to_pin >= target.inputs.len() {
                    return None;
                }
                let source = self.node(c.from_node)?;
                source.output(c.from_pin).cloned().map(|v| (c.to_pin, v))
            })
            .collect();

        if let Some(node) = self.node_mut(node_id) {
            for (pin, value) in updates {
                node.input_values.insert(pin, value);
            }
        }
    }

    /// Copy `node_id`'s current output values across every outgoing data edge
    pub fn propagate_node_outputs(&mut self, node_id: NodeId) {
        let updates: Vec<(NodeId, usize, crate::Value)> = self
            .outgoing(node_id)
            .filter(|c| self.connection_kind(c) == Some(PinKind::Data))
            .filter_map(|c| {
                let source = self.node(node_id)?;
                source
                    .output(c.from_pin)
                    .cloned()
                    .map(|v| (c.to_node, c.to_pin, v))
            })
            .collect();

        for (target_id, pin, value) in updates {
            if let Some(target) = self.node_mut(target_id) {
                if pin < target.inputs.len() {
                    target.input_values.insert(pin, value);
                }
            }
        }
    }

    /// Refresh the upstream data cone of `node_id` just in time: resolve each
    /// data source recursively, run it if it is a pure-data node, and copy
    /// its output into the corresponding input.
    pub fn evaluate_data_dependencies(&mut self, node_id: NodeId) {
        let mut visited = HashSet::new();
        self.evaluate_dependencies_inner(node_id, &mut visited);
    }

    fn evaluate_dependencies_inner(&mut self, node_id: NodeId, visited: &mut HashSet<NodeId>) {
        if self.node(node_id).is_none() || !visited.insert(node_id) {
            return;
        }

        let incoming: Vec<Connection> = self.incoming(node_id).copied().collect();
        for connection in incoming {
            if self.connection_kind(&connection) != Some(PinKind::Data) {
                continue;
            }

            self.evaluate_dependencies_inner(connection.from_node, visited);

            let source_is_pure = self
                .node(connection.from_node)
                .is_some_and(|n| n.pure_data && n.body.is_some());
            if source_is_pure {
                tracing::trace!("evaluating data dependency {:?}", connection.from_node);
                self.invoke_body(connection.from_node);
            }

            let value = self
                .node(connection.from_node)
                .and_then(|n| n.output(connection.from_pin))
                .cloned();
            if let Some(value) = value {
                if let Some(target) = self.node_mut(node_id) {
                    if connection.to_pin < target.inputs.len() {
                        target.input_values.insert(connection.to_pin, value);
                    }
                }
            }
        }
    }

    /// Run a node's body, pulling connected input values first.
    ///
    /// This is the materialized form of the descriptor contract: every body
    /// observes up-to-date inputs without pulling them itself.
    pub(crate) fn invoke_body(&mut self, node_id: NodeId) {
        let Some(body) = self.node(node_id).and_then(|n| n.body.clone()) else {
            return;
        };
        self.update_node_inputs(node_id);
        if let Some(node) = self.node_mut(node_id) {
            body(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{add_int_descriptor, int_descriptor};
    use crate::value::{ObjectHandle, Value};

    #[test]
    fn test_connect_copies_source_output() {
        let mut g = ScriptGraph::new(ObjectHandle::new());
        let two = g.spawn(&int_descriptor(2));
        let three = g.spawn(&int_descriptor(3));
        let sum = g.spawn(&add_int_descriptor());
        g.connect(two, 0, sum, 0).unwrap();
        g.connect(three, 0, sum, 1).unwrap();

        // connect() already forced a refresh
        let sum_node = g.node(sum).unwrap();
        assert_eq!(sum_node.input(0), Some(&Value::Int(2)));
        assert_eq!(sum_node.input(1), Some(&Value::Int(3)));
        assert_eq!(sum_node.output(0), Some(&Value::Int(5)));
    }

    #[test]
    fn test_disconnect_restores_recorded_default() {
        let mut g = ScriptGraph::new(ObjectHandle::new());
        let seven = g.spawn(&int_descriptor(7));
        let override_src = g.spawn(&int_descriptor(99));
        g.connect(override_src, 0, seven, 0).unwrap();
        assert_eq!(g.node(seven).unwrap().input(0), Some(&Value::Int(99)));

        g.disconnect_input_pin(seven, 0);
        // the recorded default comes back, not zero/empty
        assert_eq!(g.node(seven).unwrap().input(0), Some(&Value::Int(7)));
        g.force_update_all_inputs();
        assert_eq!(g.node(seven).unwrap().output(0), Some(&Value::Int(7)));
    }

    #[test]
    fn test_just_in_time_dependency_refresh() {
        let mut g = ScriptGraph::new(ObjectHandle::new());
        let a = g.spawn(&int_descriptor(1));
        let b = g.spawn(&int_descriptor(2));
        let sum = g.spawn(&add_int_descriptor());
        g.connect(a, 0, sum, 0).unwrap();
        g.connect(b, 0, sum, 1).unwrap();

        // mutate an upstream constant after the last full refresh
        g.node_mut(a).unwrap().set_input(0, 40);
        g.evaluate_data_dependencies(sum);
        let sum_node = g.node(sum).unwrap();
        assert_eq!(sum_node.input(0), Some(&Value::Int(40)));
        assert_eq!(sum_node.input(1), Some(&Value::Int(2)));
    }

    #[test]
    fn test_propagation_reaches_transitive_dependents() {
        let mut g = ScriptGraph::new(ObjectHandle::new());
        let a = g.spawn(&int_descriptor(10));
        let sum1 = g.spawn(&add_int_descriptor());
        let sum2 = g.spawn(&add_int_descriptor());
        g.connect(a, 0, sum1, 0).unwrap();
        g.connect(sum1, 0, sum2, 0).unwrap();

        g.force_update_all_inputs();
        assert_eq!(g.node(sum2).unwrap().output(0), Some(&Value::Int(10)));
    }
}
