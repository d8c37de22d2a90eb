// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure: node arena, connection table, and the connection
//! validator.
//!
//! Wiring goes through [`ScriptGraph::connect`], which enforces the model
//! invariants: pins exist and agree on exec/data kind, no self-loops, an
//! input pin takes at most one incoming edge, and no connection may close a
//! cycle among edges of its own kind. Data edges stay acyclic so the
//! topological schedule is well defined; exec edges stay acyclic so the
//! interpreter's recursive walk terminates. Repetition is expressed through
//! the For Loop node, which re-enters its body subgraph per iteration rather
//! than through back-edges.

use crate::connection::{Connection, ConnectionId};
use crate::node::{NodeId, ScriptNode};
use crate::pin::PinKind;
use crate::schedule::Schedule;
use crate::value::ObjectHandle;
use indexmap::IndexMap;
use slotmap::SlotMap;
use std::collections::HashSet;

/// A visual scripting graph owned by a single engine object.
///
/// Fully synchronous and single-owner: mutation, scheduling, and execution
/// all happen on the calling thread.
pub struct ScriptGraph {
    /// The entity this graph is attached to (non-owning)
    owner: ObjectHandle,
    /// Node arena; handles are generation-checked
    nodes: SlotMap<NodeId, ScriptNode>,
    /// Connections in insertion order
    connections: IndexMap<ConnectionId, Connection>,
    /// Cached topological order over data edges
    pub(crate) schedule: Schedule,
}

impl ScriptGraph {
    /// Create an empty graph attached to `owner`
    pub fn new(owner: ObjectHandle) -> Self {
        Self {
            owner,
            nodes: SlotMap::with_key(),
            connections: IndexMap::new(),
            schedule: Schedule::default(),
        }
    }

    /// The entity this graph is attached to
    pub fn owner(&self) -> ObjectHandle {
        self.owner
    }

    /// Get a node by handle
    pub fn node(&self, node_id: NodeId) -> Option<&ScriptNode> {
        self.nodes.get(node_id)
    }

    /// Get a mutable node by handle
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut ScriptNode> {
        self.nodes.get_mut(node_id)
    }

    /// Iterate all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &ScriptNode> {
        self.nodes.values()
    }

    /// Iterate all node handles
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Find a node by its display title
    pub fn find_by_title(&self, title: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.title == title)
            .map(|(id, _)| id)
    }

    pub(crate) fn insert_node(
        &mut self,
        build: impl FnOnce(NodeId) -> ScriptNode,
    ) -> NodeId {
        let id = self.nodes.insert_with_key(build);
        self.mark_schedule_dirty();
        id
    }

    /// Remove a node together with all its incident connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<ScriptNode> {
        self.connections.retain(|_, c| !c.involves_node(node_id));
        let removed = self.nodes.remove(node_id);
        if removed.is_some() {
            self.mark_schedule_dirty();
        }
        removed
    }

    /// Iterate all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Iterate connections arriving at a node
    pub fn incoming(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.to_node == node_id)
    }

    /// Iterate connections leaving a node
    pub fn outgoing(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.from_node == node_id)
    }

    /// Whether a pin has at least one connection
    pub fn has_connection(&self, node_id: NodeId, pin: usize, is_input: bool) -> bool {
        self.connections.values().any(|c| {
            if is_input {
                c.to_node == node_id && c.to_pin == pin
            } else {
                c.from_node == node_id && c.from_pin == pin
            }
        })
    }

    /// Kind of the edge, determined by its source output pin.
    /// `None` when the connection dangles.
    pub(crate) fn connection_kind(&self, connection: &Connection) -> Option<PinKind> {
        self.nodes
            .get(connection.from_node)?
            .output_pin(connection.from_pin)
            .map(|p| p.kind)
    }

    /// Wire an output pin to an input pin.
    ///
    /// Runs integrity cleanup first, validates the edge, and on success marks
    /// the schedule dirty and refreshes all node inputs so UI-visible values
    /// update immediately. On rejection the graph is left unchanged.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_pin: usize,
        to_node: NodeId,
        to_pin: usize,
    ) -> Result<ConnectionId, ConnectionError> {
        self.cleanup_invalid_connections();

        if let Err(err) = self.validate_connection(from_node, from_pin, to_node, to_pin) {
            tracing::warn!("connection rejected: {err}");
            return Err(err);
        }

        let connection = Connection::new(from_node, from_pin, to_node, to_pin);
        let id = connection.id;
        self.connections.insert(id, connection);
        self.mark_schedule_dirty();
        tracing::debug!(
            "connected {from_node:?}:{from_pin} -> {to_node:?}:{to_pin}"
        );

        self.force_update_all_inputs();
        Ok(id)
    }

    fn validate_connection(
        &self,
        from_node: NodeId,
        from_pin: usize,
        to_node: NodeId,
        to_pin: usize,
    ) -> Result<(), ConnectionError> {
        let source = self
            .nodes
            .get(from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?;
        let target = self
            .nodes
            .get(to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?;

        let source_pin = source.output_pin(from_pin).ok_or(ConnectionError::PinOutOfRange {
            node: from_node,
            pin: from_pin,
        })?;
        let target_pin = target.input_pin(to_pin).ok_or(ConnectionError::PinOutOfRange {
            node: to_node,
            pin: to_pin,
        })?;

        if source_pin.kind != target_pin.kind {
            return Err(ConnectionError::KindMismatch);
        }

        if from_node == to_node {
            return Err(ConnectionError::SelfLoop);
        }

        if self.has_connection(to_node, to_pin, true) {
            return Err(ConnectionError::InputAlreadyConnected {
                node: to_node,
                pin: to_pin,
            });
        }

        if self.would_create_cycle(from_node, to_node, source_pin.kind) {
            return Err(ConnectionError::WouldCreateCycle);
        }

        Ok(())
    }

    /// Whether adding an edge of `kind` from `from_node` to `to_node` would
    /// close a cycle among edges of that kind.
    pub fn would_create_cycle(&self, from_node: NodeId, to_node: NodeId, kind: PinKind) -> bool {
        let mut visited = HashSet::new();
        self.has_path_to_node(to_node, from_node, kind, &mut visited)
    }

    fn has_path_to_node(
        &self,
        current: NodeId,
        target: NodeId,
        kind: PinKind,
        visited: &mut HashSet<NodeId>,
    ) -> bool {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            return false;
        }

        for connection in self.outgoing(current) {
            if self.connection_kind(connection) != Some(kind) {
                continue;
            }
            if self.has_path_to_node(connection.to_node, target, kind, visited) {
                return true;
            }
        }
        false
    }

    /// Remove every connection arriving at an input pin, restoring the pin's
    /// recorded default value if one exists (otherwise the input is cleared).
    pub fn disconnect_input_pin(&mut self, node_id: NodeId, pin: usize) {
        let before = self.connections.len();
        self.connections
            .retain(|_, c| !(c.to_node == node_id && c.to_pin == pin));
        let removed = before - self.connections.len();

        if removed > 0 {
            if let Some(node) = self.nodes.get_mut(node_id) {
                match node.default_values.get(&pin).cloned() {
                    Some(default) => {
                        node.input_values.insert(pin, default);
                    }
                    None => {
                        node.input_values.remove(&pin);
                    }
                }
            }
            self.mark_schedule_dirty();
            tracing::debug!("disconnected {removed} edge(s) from input {node_id:?}:{pin}");
        }
    }

    /// Remove every connection leaving an output pin
    pub fn disconnect_output_pin(&mut self, node_id: NodeId, pin: usize) {
        let before = self.connections.len();
        self.connections
            .retain(|_, c| !(c.from_node == node_id && c.from_pin == pin));
        if before != self.connections.len() {
            self.mark_schedule_dirty();
        }
    }

    fn connection_is_valid(&self, connection: &Connection) -> bool {
        let (Some(source), Some(target)) = (
            self.nodes.get(connection.from_node),
            self.nodes.get(connection.to_node),
        ) else {
            return false;
        };
        connection.from_pin < source.outputs.len() && connection.to_pin < target.inputs.len()
    }

    /// Check that every connection references live nodes and in-range pins
    pub fn validate_connection_integrity(&self) -> bool {
        let mut valid = true;
        for connection in self.connections.values() {
            if !self.connection_is_valid(connection) {
                tracing::warn!(
                    "dangling connection {:?}:{} -> {:?}:{}",
                    connection.from_node,
                    connection.from_pin,
                    connection.to_node,
                    connection.to_pin
                );
                valid = false;
            }
        }
        valid
    }

    /// Drop connections that reference removed nodes or out-of-range pins.
    /// Runs automatically before every mutation and execution pass.
    pub fn cleanup_invalid_connections(&mut self) -> usize {
        let stale: Vec<ConnectionId> = self
            .connections
            .values()
            .filter(|c| !self.connection_is_valid(c))
            .map(|c| c.id)
            .collect();

        for id in &stale {
            if let Some(connection) = self.connections.swap_remove(id) {
                tracing::warn!(
                    "removed dangling connection {:?}:{} -> {:?}:{}",
                    connection.from_node,
                    connection.from_pin,
                    connection.to_node,
                    connection.to_pin
                );
            }
        }
        if !stale.is_empty() {
            self.mark_schedule_dirty();
        }
        stale.len()
    }
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found (removed, or stale handle)
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Pin index out of range for the node
    #[error("pin {pin} out of range on node {node:?}")]
    PinOutOfRange {
        /// The node whose pin list was indexed
        node: NodeId,
        /// The offending pin index
        pin: usize,
    },

    /// Exec pins only connect to exec pins, data pins to data pins
    #[error("exec/data pin kind mismatch")]
    KindMismatch,

    /// A node cannot connect to itself
    #[error("self-loop not allowed")]
    SelfLoop,

    /// The target input pin already has an incoming connection
    #[error("input pin {pin} on node {node:?} already connected")]
    InputAlreadyConnected {
        /// The target node
        node: NodeId,
        /// The occupied input pin index
        pin: usize,
    },

    /// The edge would close a cycle among edges of its kind
    #[error("connection would create a cycle")]
    WouldCreateCycle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{add_int_descriptor, int_descriptor, print_descriptor};
    use crate::value::ObjectHandle;

    fn graph() -> ScriptGraph {
        ScriptGraph::new(ObjectHandle::new())
    }

    #[test]
    fn test_connect_data_pins() {
        let mut g = graph();
        let a = g.spawn(&int_descriptor(1));
        let b = g.spawn(&add_int_descriptor());
        assert!(g.connect(a, 0, b, 0).is_ok());
        assert_eq!(g.connection_count(), 1);
    }

    #[test]
    fn test_reject_self_loop() {
        let mut g = graph();
        let a = g.spawn(&add_int_descriptor());
        assert!(matches!(
            g.connect(a, 0, a, 0),
            Err(ConnectionError::SelfLoop)
        ));
        assert_eq!(g.connection_count(), 0);
    }

    #[test]
    fn test_reject_kind_mismatch() {
        let mut g = graph();
        let a = g.spawn(&int_descriptor(0));
        let b = g.spawn(&print_descriptor());
        // data output into the print node's exec input
        assert!(matches!(
            g.connect(a, 0, b, 0),
            Err(ConnectionError::KindMismatch)
        ));
    }

    #[test]
    fn test_reject_second_edge_into_input() {
        let mut g = graph();
        let a = g.spawn(&int_descriptor(1));
        let b = g.spawn(&int_descriptor(2));
        let c = g.spawn(&add_int_descriptor());
        g.connect(a, 0, c, 0).unwrap();
        assert!(matches!(
            g.connect(b, 0, c, 0),
            Err(ConnectionError::InputAlreadyConnected { .. })
        ));
        assert_eq!(g.connection_count(), 1);
    }

    #[test]
    fn test_reject_data_cycle() {
        let mut g = graph();
        let a = g.spawn(&add_int_descriptor());
        let b = g.spawn(&add_int_descriptor());
        let c = g.spawn(&add_int_descriptor());
        g.connect(a, 0, b, 0).unwrap();
        g.connect(b, 0, c, 0).unwrap();
        // closing c -> a would make a back to its own ancestor
        assert!(matches!(
            g.connect(c, 0, a, 0),
            Err(ConnectionError::WouldCreateCycle)
        ));
        assert_eq!(g.connection_count(), 2);
    }

    #[test]
    fn test_pin_out_of_range() {
        let mut g = graph();
        let a = g.spawn(&int_descriptor(0));
        let b = g.spawn(&add_int_descriptor());
        assert!(matches!(
            g.connect(a, 5, b, 0),
            Err(ConnectionError::PinOutOfRange { .. })
        ));
    }

    #[test]
    fn test_stale_handle_fails_lookup() {
        let mut g = graph();
        let a = g.spawn(&int_descriptor(0));
        let b = g.spawn(&add_int_descriptor());
        g.connect(a, 0, b, 0).unwrap();
        g.remove_node(a);
        assert!(g.node(a).is_none());
        // incident connections went with the node
        assert_eq!(g.connection_count(), 0);
        assert!(matches!(
            g.connect(a, 0, b, 0),
            Err(ConnectionError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_cleanup_drops_dangling_connections() {
        let mut g = graph();
        let a = g.spawn(&int_descriptor(0));
        let b = g.spawn(&add_int_descriptor());
        let id = g.connect(a, 0, b, 0).unwrap();
        // forcibly dangle the edge by shrinking the source's pin list
        g.node_mut(a).unwrap().outputs.clear();
        assert!(!g.validate_connection_integrity());
        assert_eq!(g.cleanup_invalid_connections(), 1);
        assert!(g.connections().all(|c| c.id != id));
        assert!(g.validate_connection_integrity());
    }
}
