// SPDX-License-Identifier: MIT OR Apache-2.0
//! Control-flow nodes.
//!
//! These carry no body logic of their own; the interpreter recognizes their
//! [`NodeKind`] and drives their exec outputs (true/false for Branch, the
//! completed/body pair plus the index output for For Loop).

use kestrel_script_graph::{NodeCategory, NodeDescriptor, NodeKind, NodeRegistry};

/// "Branch": follows exec output 0 when the condition is true, output 1
/// otherwise
pub fn branch() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Flow, "Branch", |_| {})
        .with_kind(NodeKind::Branch)
        .with_exec_input()
        .with_exec_output()
        .with_input("Condition", false)
}

/// "For Loop": runs its body subgraph (exec output 1) once per index in
/// `[Start, End)`, publishing the index on its data output, then fires the
/// completed path (exec output 0)
pub fn for_loop() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Flow, "For Loop", |_| {})
        .with_kind(NodeKind::ForLoop)
        .with_exec_input()
        .with_exec_output()
        .with_input("Start", 0)
        .with_input("End", 10)
        .with_output("Index", 0)
}

/// Register the control-flow nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(branch());
    registry.register(for_loop());
}
