// SPDX-License-Identifier: MIT OR Apache-2.0
//! Push-based execution over the exec-pin subgraph.
//!
//! [`ScriptGraph::execute_graph`] and
//! [`ScriptGraph::execute_graph_on_tick`] refresh the whole data snapshot,
//! locate the On Start / On Tick entry node, and walk outgoing exec edges
//! from there. Before any body runs, its upstream data cone is resolved just
//! in time, so execution order never observes stale values.
//!
//! Branch and For Loop dispatch on [`NodeKind`], resolved once at
//! materialization. Recursion depth equals exec-graph depth; For Loop
//! iteration is a plain synchronous loop.

use crate::graph::ScriptGraph;
use crate::node::{NodeId, NodeKind};
use crate::pin::PinKind;

impl ScriptGraph {
    /// Run the graph from its "On Start" entry node.
    /// A missing entry node is a silent no-op.
    pub fn execute_graph(&mut self) {
        self.run_entry(NodeKind::OnStart);
    }

    /// Run the graph from its "On Tick" entry node, once per frame.
    /// A missing entry node is a silent no-op.
    pub fn execute_graph_on_tick(&mut self) {
        self.run_entry(NodeKind::OnTick);
    }

    fn run_entry(&mut self, kind: NodeKind) {
        self.cleanup_invalid_connections();
        self.force_update_all_inputs();
        let Some(entry) = self.find_entry(kind) else {
            tracing::debug!("no {kind:?} entry node, nothing to execute");
            return;
        };
        self.execute_from(entry);
    }

    /// Find the entry node of the given kind
    pub fn find_entry(&self, kind: NodeKind) -> Option<NodeId> {
        self.nodes()
            .find(|n| n.kind == kind)
            .map(|n| n.id)
    }

    /// Execute a node and continue along its outgoing exec edges.
    ///
    /// Resolves the node's data dependencies, invokes its body, then follows
    /// control flow according to the node's kind. Missing targets are logged
    /// and skipped; body panics are not caught here.
    pub fn execute_from(&mut self, node_id: NodeId) {
        let Some(node) = self.node(node_id) else {
            tracing::warn!("execution target {node_id:?} no longer exists, skipping");
            return;
        };
        if node.body.is_none() {
            return;
        }
        let kind = node.kind;

        self.evaluate_data_dependencies(node_id);
        self.invoke_body(node_id);

        match kind {
            NodeKind::Branch => self.execute_branch(node_id),
            NodeKind::ForLoop => self.execute_for_loop(node_id),
            NodeKind::Ordinary | NodeKind::OnStart | NodeKind::OnTick => {
                for target in self.exec_targets(node_id, None) {
                    self.execute_from(target);
                }
            }
        }
    }

    /// Exec-edge targets leaving `node_id`, optionally restricted to one
    /// output pin. Order follows connection insertion order.
    fn exec_targets(&self, node_id: NodeId, from_pin: Option<usize>) -> Vec<NodeId> {
        self.outgoing(node_id)
            .filter(|c| from_pin.map_or(true, |pin| c.from_pin == pin))
            .filter(|c| self.connection_kind(c) == Some(PinKind::Exec))
            .map(|c| c.to_node)
            .collect()
    }

    // Exec output 0 carries the true path, output 1 the false path.
    fn execute_branch(&mut self, node_id: NodeId) {
        self.update_node_inputs(node_id);
        let condition = self
            .node(node_id)
            .is_some_and(|n| n.input_bool(1, false));
        let selected = if condition { 0 } else { 1 };

        for target in self.exec_targets(node_id, Some(selected)) {
            self.execute_from(target);
        }
    }

    // Exec output 0 fires once after the loop completes, exec output 1 fires
    // per iteration; data output 2 carries the loop index.
    fn execute_for_loop(&mut self, node_id: NodeId) {
        self.update_node_inputs(node_id);
        let (start, end) = match self.node(node_id) {
            Some(n) => (n.input_int(1, 0), n.input_int(2, 0)),
            None => return,
        };

        let body_targets = self.exec_targets(node_id, Some(1));
        let completed_targets = self.exec_targets(node_id, Some(0));

        for i in start..end {
            if let Some(node) = self.node_mut(node_id) {
                node.set_output(2, i);
            }
            for &target in &body_targets {
                if target != node_id {
                    self.execute_from(target);
                }
            }
        }

        for &target in &completed_targets {
            if target != node_id {
                self.execute_from(target);
            }
        }
    }
}
