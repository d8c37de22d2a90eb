// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node descriptors and their materialization into graph instances.
//!
//! A [`NodeDescriptor`] is the contract node libraries register against:
//! category, interpreter kind, exec-pin flags, ordered named+defaulted data
//! pins, and the body closure. [`ScriptGraph::spawn`] lays the pins out
//! (exec pin first, two exec outputs for Branch/For Loop), seeds input and
//! default values, and fixes the node's pure-data classification once.

use crate::graph::ScriptGraph;
use crate::node::{NodeBody, NodeCategory, NodeId, NodeKind, ScriptNode};
use crate::pin::Pin;
use crate::value::Value;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::rc::Rc;

/// Registration record for a node type
#[derive(Clone)]
pub struct NodeDescriptor {
    /// Palette category
    pub category: NodeCategory,
    /// Display title, also the registry key
    pub title: String,
    /// Interpreter dispatch kind
    pub kind: NodeKind,
    /// Whether instances get an incoming exec pin (input index 0)
    pub has_exec_input: bool,
    /// Whether instances get outgoing exec pin(s) (output index 0, and 1 for
    /// Branch / For Loop)
    pub has_exec_output: bool,
    /// Ordered data input pins: (name, default value)
    pub inputs: Vec<(String, Value)>,
    /// Ordered data output pins: (name, declared default)
    pub outputs: Vec<(String, Value)>,
    /// Body invoked when an instance executes
    pub body: NodeBody,
}

impl NodeDescriptor {
    /// Create a descriptor with no pins and ordinary dispatch
    pub fn new(
        category: NodeCategory,
        title: impl Into<String>,
        body: impl Fn(&mut ScriptNode) + 'static,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            kind: NodeKind::Ordinary,
            has_exec_input: false,
            has_exec_output: false,
            inputs: Vec::new(),
            outputs: Vec::new(),
            body: Rc::new(body),
        }
    }

    /// Set the interpreter dispatch kind
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add an incoming exec pin
    pub fn with_exec_input(mut self) -> Self {
        self.has_exec_input = true;
        self
    }

    /// Add outgoing exec pin(s)
    pub fn with_exec_output(mut self) -> Self {
        self.has_exec_output = true;
        self
    }

    /// Append a data input pin with its default value
    pub fn with_input(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.inputs.push((name.into(), default.into()));
        self
    }

    /// Append a data output pin with its declared default
    pub fn with_output(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.outputs.push((name.into(), default.into()));
        self
    }
}

impl std::fmt::Debug for NodeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeDescriptor")
            .field("title", &self.title)
            .field("category", &self.category)
            .field("kind", &self.kind)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .finish_non_exhaustive()
    }
}

/// Registry of available node types, keyed by title
#[derive(Default)]
pub struct NodeRegistry {
    descriptors: IndexMap<String, NodeDescriptor>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            descriptors: IndexMap::new(),
        }
    }

    /// Register a descriptor, replacing any previous one with the same title
    pub fn register(&mut self, descriptor: NodeDescriptor) {
        self.descriptors.insert(descriptor.title.clone(), descriptor);
    }

    /// Get a descriptor by title
    pub fn get(&self, title: &str) -> Option<&NodeDescriptor> {
        self.descriptors.get(title)
    }

    /// Iterate all registered descriptors
    pub fn descriptors(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.descriptors.values()
    }

    /// Iterate descriptors of one category
    pub fn in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeDescriptor> {
        self.descriptors
            .values()
            .filter(move |d| d.category == category)
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl ScriptGraph {
    /// Materialize a descriptor into this graph.
    ///
    /// Pin layout: the exec input (if any) takes input index 0, data inputs
    /// follow in declaration order; exec outputs come first (two for Branch /
    /// For Loop), then data outputs. Data inputs are seeded with their
    /// defaults, which are also recorded for restore-on-disconnect.
    pub fn spawn(&mut self, descriptor: &NodeDescriptor) -> NodeId {
        let mut inputs = Vec::new();
        let mut input_names = Vec::new();
        let mut input_values = HashMap::new();
        let mut default_values = HashMap::new();

        if descriptor.has_exec_input {
            inputs.push(Pin::exec(0));
            input_names.push(String::new());
        }
        for (name, default) in &descriptor.inputs {
            let index = inputs.len();
            inputs.push(Pin::data(index));
            input_names.push(name.clone());
            input_values.insert(index, default.clone());
            default_values.insert(index, default.clone());
        }

        let mut outputs = Vec::new();
        let mut output_names = Vec::new();

        if descriptor.has_exec_output {
            let exec_outs = match descriptor.kind {
                NodeKind::Branch | NodeKind::ForLoop => 2,
                _ => 1,
            };
            for _ in 0..exec_outs {
                outputs.push(Pin::exec(outputs.len()));
                output_names.push(String::new());
            }
        }
        for (name, _) in &descriptor.outputs {
            outputs.push(Pin::data(outputs.len()));
            output_names.push(name.clone());
        }

        let pure_data = !descriptor.has_exec_input;
        let owner = self.owner();
        let title = descriptor.title.clone();
        let category = descriptor.category;
        let kind = descriptor.kind;
        let body = descriptor.body.clone();

        self.insert_node(|id| ScriptNode {
            id,
            title,
            category,
            kind,
            pure_data,
            inputs,
            outputs,
            input_names,
            output_names,
            input_values,
            output_values: HashMap::new(),
            default_values,
            owner,
            body: Some(body),
        })
    }

    /// Materialize a registered node type by title
    pub fn spawn_from(&mut self, registry: &NodeRegistry, title: &str) -> Option<NodeId> {
        registry.get(title).map(|d| self.spawn(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::PinKind;
    use crate::testing::{branch_descriptor, for_loop_descriptor, print_descriptor};
    use crate::value::ObjectHandle;

    #[test]
    fn test_spawn_lays_out_exec_pin_first() {
        let mut g = ScriptGraph::new(ObjectHandle::new());
        let id = g.spawn(&print_descriptor());
        let node = g.node(id).unwrap();
        assert_eq!(node.inputs[0].kind, PinKind::Exec);
        assert_eq!(node.inputs[1].kind, PinKind::Data);
        assert_eq!(node.input_name(1), "Message");
        assert_eq!(node.outputs.len(), 1);
        assert!(node.outputs[0].is_exec());
        assert!(!node.pure_data);
    }

    #[test]
    fn test_control_nodes_get_two_exec_outputs() {
        let mut g = ScriptGraph::new(ObjectHandle::new());
        let branch = g.spawn(&branch_descriptor(false));
        let for_loop = g.spawn(&for_loop_descriptor(0, 10));

        let branch = g.node(branch).unwrap();
        assert!(branch.outputs[0].is_exec() && branch.outputs[1].is_exec());
        assert_eq!(branch.outputs.len(), 2);

        let for_loop = g.node(for_loop).unwrap();
        assert!(for_loop.outputs[0].is_exec() && for_loop.outputs[1].is_exec());
        assert_eq!(for_loop.outputs[2].kind, PinKind::Data);
        assert_eq!(for_loop.output_name(2), "Index");
    }

    #[test]
    fn test_defaults_seeded_and_recorded() {
        let mut g = ScriptGraph::new(ObjectHandle::new());
        let id = g.spawn(&for_loop_descriptor(2, 8));
        let node = g.node(id).unwrap();
        assert_eq!(node.input_int(1, -1), 2);
        assert_eq!(node.input_int(2, -1), 8);
        assert_eq!(node.default_values.len(), 2);
    }

    #[test]
    fn test_registry_lookup_and_spawn() {
        let mut registry = NodeRegistry::new();
        registry.register(print_descriptor());
        registry.register(branch_descriptor(false));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.in_category(NodeCategory::Flow).count(), 1);

        let mut g = ScriptGraph::new(ObjectHandle::new());
        assert!(g.spawn_from(&registry, "Print").is_some());
        assert!(g.spawn_from(&registry, "No Such Node").is_none());
    }
}
