// SPDX-License-Identifier: MIT OR Apache-2.0
//! Entry event nodes.

use kestrel_script_graph::{NodeCategory, NodeDescriptor, NodeKind, NodeRegistry};

/// "On Start": fired once when the owning object begins play
pub fn on_start() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Event, "On Start", |_| {})
        .with_kind(NodeKind::OnStart)
        .with_exec_output()
}

/// "On Tick": fired every frame
pub fn on_tick() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Event, "On Tick", |_| {})
        .with_kind(NodeKind::OnTick)
        .with_exec_output()
}

/// Register the event nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(on_start());
    registry.register(on_tick());
}
