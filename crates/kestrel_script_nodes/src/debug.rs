// SPDX-License-Identifier: MIT OR Apache-2.0
//! Debug/logging nodes.

use kestrel_script_graph::{NodeCategory, NodeDescriptor, NodeRegistry};

/// "Print": renders whatever value is wired to its Message input and logs it.
///
/// The rendered text is also published on the "Printed" data output so other
/// nodes (and tests) can observe what was emitted.
pub fn print() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Debug, "Print", |node| {
        let text = node
            .input(1)
            .map(ToString::to_string)
            .unwrap_or_default();
        tracing::info!("[Print] {text}");
        node.set_output(1, text);
    })
    .with_exec_input()
    .with_exec_output()
    .with_input("Message", "")
    .with_output("Printed", "")
}

/// Register the debug nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(print());
}
