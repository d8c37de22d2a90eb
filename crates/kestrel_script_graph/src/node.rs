// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the script graph.
//!
//! A [`ScriptNode`] is a materialized node instance: its pins, its typed
//! input/output/default value storage, and the body callback invoked when the
//! interpreter reaches it. Nodes live in the graph's slotmap arena and are
//! addressed through generation-checked [`NodeId`] handles, so a handle to a
//! deleted node fails lookup instead of silently aliasing a reused id.

use crate::pin::Pin;
use crate::value::{ObjectHandle, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

slotmap::new_key_type! {
    /// Generation-checked handle to a node in a [`crate::ScriptGraph`]
    pub struct NodeId;
}

/// Node category, used for palette grouping and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Entry events (On Start, On Tick)
    Event,
    /// Control flow (Branch, For Loop)
    Flow,
    /// Constants and literals
    Constant,
    /// Math operations
    Math,
    /// Comparisons and boolean logic
    Compare,
    /// Debug/logging utilities
    Debug,
    /// User-defined
    Custom,
}

/// How the interpreter treats a node.
///
/// Resolved once when the node is materialized from its descriptor; the
/// interpreter dispatches on this instead of comparing titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Plain node: body runs, then every outgoing exec edge is followed
    Ordinary,
    /// Two exec outputs; exactly one is followed based on a bool condition
    Branch,
    /// Re-enters its body subgraph once per iteration of `[start, end)`
    ForLoop,
    /// Entry point for [`crate::ScriptGraph::execute_graph`]
    OnStart,
    /// Entry point for [`crate::ScriptGraph::execute_graph_on_tick`]
    OnTick,
}

/// Body callback invoked when a node executes.
///
/// Bodies receive the node itself and read inputs / write outputs through its
/// value accessors. Connected input values are pulled by the engine before
/// the body runs.
pub type NodeBody = Rc<dyn Fn(&mut ScriptNode)>;

/// A materialized node instance in a script graph
pub struct ScriptNode {
    /// Handle to this node in its graph's arena
    pub id: NodeId,
    /// Display title
    pub title: String,
    /// Category
    pub category: NodeCategory,
    /// Interpreter dispatch kind
    pub kind: NodeKind,
    /// Whether this node is evaluated eagerly during input refresh
    /// (no incoming exec pin)
    pub pure_data: bool,
    /// Input pins, in declaration order
    pub inputs: Vec<Pin>,
    /// Output pins, in declaration order
    pub outputs: Vec<Pin>,
    /// Input pin names, aligned by pin index (exec pins are unnamed)
    pub input_names: Vec<String>,
    /// Output pin names, aligned by pin index
    pub output_names: Vec<String>,
    /// Current input values by pin index
    pub input_values: HashMap<usize, Value>,
    /// Current output values by pin index
    pub output_values: HashMap<usize, Value>,
    /// Recorded defaults, restored when an input is disconnected
    pub default_values: HashMap<usize, Value>,
    /// The entity owning the graph this node belongs to (non-owning)
    pub owner: ObjectHandle,
    /// Body callback, if any
    pub body: Option<NodeBody>,
}

impl ScriptNode {
    /// Get an input value by pin index
    pub fn input(&self, pin: usize) -> Option<&Value> {
        self.input_values.get(&pin)
    }

    /// Get an output value by pin index
    pub fn output(&self, pin: usize) -> Option<&Value> {
        self.output_values.get(&pin)
    }

    /// Set an input value by pin index
    pub fn set_input(&mut self, pin: usize, value: impl Into<Value>) {
        self.input_values.insert(pin, value.into());
    }

    /// Set an output value by pin index
    pub fn set_output(&mut self, pin: usize, value: impl Into<Value>) {
        self.output_values.insert(pin, value.into());
    }

    /// Read an input as bool; missing value or type mismatch yields `default`
    pub fn input_bool(&self, pin: usize, default: bool) -> bool {
        self.input(pin).map_or(default, |v| v.as_bool_or(default))
    }

    /// Read an input as int; missing value or type mismatch yields `default`
    pub fn input_int(&self, pin: usize, default: i32) -> i32 {
        self.input(pin).map_or(default, |v| v.as_int_or(default))
    }

    /// Read an input as float; missing value or type mismatch yields `default`
    pub fn input_float(&self, pin: usize, default: f32) -> f32 {
        self.input(pin).map_or(default, |v| v.as_float_or(default))
    }

    /// Read an input as string; missing value or type mismatch yields `default`
    pub fn input_string(&self, pin: usize, default: &str) -> String {
        self.input(pin)
            .map_or_else(|| default.to_string(), |v| v.as_string_or(default))
    }

    /// Read an output as int; missing value or type mismatch yields `default`
    pub fn output_int(&self, pin: usize, default: i32) -> i32 {
        self.output(pin).map_or(default, |v| v.as_int_or(default))
    }

    /// Read an output as string; missing value or type mismatch yields `default`
    pub fn output_string(&self, pin: usize, default: &str) -> String {
        self.output(pin)
            .map_or_else(|| default.to_string(), |v| v.as_string_or(default))
    }

    /// Whether the node has an incoming exec pin
    pub fn has_exec_input(&self) -> bool {
        self.inputs.iter().any(Pin::is_exec)
    }

    /// Get an input pin by index
    pub fn input_pin(&self, pin: usize) -> Option<&Pin> {
        self.inputs.get(pin)
    }

    /// Get an output pin by index
    pub fn output_pin(&self, pin: usize) -> Option<&Pin> {
        self.outputs.get(pin)
    }

    /// Name of an input pin, for diagnostics
    pub fn input_name(&self, pin: usize) -> &str {
        self.input_names.get(pin).map_or("", String::as_str)
    }

    /// Name of an output pin, for diagnostics
    pub fn output_name(&self, pin: usize) -> &str {
        self.output_names.get(pin).map_or("", String::as_str)
    }
}

impl std::fmt::Debug for ScriptNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptNode")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("pure_data", &self.pure_data)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .finish_non_exhaustive()
    }
}
