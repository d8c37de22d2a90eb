// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual scripting graph engine for Kestrel.
//!
//! This crate implements the behavior-graph core that lets designers wire
//! nodes (math, queries, conditionals, loops) into executable logic without
//! writing code. It combines:
//!
//! - A push-based interpreter over exec-pin connections, entered from the
//!   "On Start" / "On Tick" event nodes
//! - A pull-based, memoized data-dependency resolver that refreshes a node's
//!   upstream values right before its body runs
//! - A cached Kahn topological schedule over the data subgraph
//! - Connection validation (pin kinds, single input edge, same-kind cycle
//!   rejection) with automatic integrity cleanup
//!
//! Node behavior itself is external: libraries register [`NodeDescriptor`]s
//! and the graph materializes them into [`ScriptNode`] instances.
//!
//! Everything is single-threaded and synchronous; a graph is owned and driven
//! by one caller (typically the component of the entity it is attached to).

pub mod connection;
pub mod evaluate;
pub mod execute;
pub mod graph;
pub mod node;
pub mod pin;
pub mod registry;
pub mod schedule;
pub mod value;

pub use connection::{Connection, ConnectionId};
pub use graph::{ConnectionError, ScriptGraph};
pub use node::{NodeBody, NodeCategory, NodeId, NodeKind, ScriptNode};
pub use pin::{Pin, PinKind};
pub use registry::{NodeDescriptor, NodeRegistry};
pub use value::{ObjectHandle, Value};

#[cfg(test)]
pub(crate) mod testing {
    //! Descriptor helpers shared by the module tests.

    use crate::node::{NodeCategory, NodeKind};
    use crate::registry::NodeDescriptor;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub fn int_descriptor(default: i32) -> NodeDescriptor {
        NodeDescriptor::new(NodeCategory::Constant, "Int", |node| {
            let value = node.input_int(0, 0);
            node.set_output(0, value);
        })
        .with_input("Value", default)
        .with_output("Value", 0)
    }

    pub fn add_int_descriptor() -> NodeDescriptor {
        NodeDescriptor::new(NodeCategory::Math, "Add Int", |node| {
            let a = node.input_int(0, 0);
            let b = node.input_int(1, 0);
            node.set_output(0, a + b);
        })
        .with_input("A", 0)
        .with_input("B", 0)
        .with_output("Result", 0)
    }

    pub fn print_descriptor() -> NodeDescriptor {
        NodeDescriptor::new(NodeCategory::Debug, "Print", |node| {
            let message = node.input_string(1, "");
            tracing::info!("{message}");
        })
        .with_exec_input()
        .with_exec_output()
        .with_input("Message", "")
    }

    pub fn start_descriptor() -> NodeDescriptor {
        NodeDescriptor::new(NodeCategory::Event, "On Start", |_| {})
            .with_kind(NodeKind::OnStart)
            .with_exec_output()
    }

    pub fn tick_descriptor() -> NodeDescriptor {
        NodeDescriptor::new(NodeCategory::Event, "On Tick", |_| {})
            .with_kind(NodeKind::OnTick)
            .with_exec_output()
    }

    pub fn branch_descriptor(default: bool) -> NodeDescriptor {
        NodeDescriptor::new(NodeCategory::Flow, "Branch", |_| {})
            .with_kind(NodeKind::Branch)
            .with_exec_input()
            .with_exec_output()
            .with_input("Condition", default)
    }

    pub fn for_loop_descriptor(start: i32, end: i32) -> NodeDescriptor {
        NodeDescriptor::new(NodeCategory::Flow, "For Loop", |_| {})
            .with_kind(NodeKind::ForLoop)
            .with_exec_input()
            .with_exec_output()
            .with_input("Start", start)
            .with_input("End", end)
            .with_output("Index", 0)
    }

    /// Exec node that records a fixed label when it runs
    pub fn recording_print_descriptor(
        label: &str,
        sink: Rc<RefCell<Vec<String>>>,
    ) -> NodeDescriptor {
        let label = label.to_string();
        NodeDescriptor::new(NodeCategory::Debug, "Record", move |_| {
            sink.borrow_mut().push(label.clone());
        })
        .with_exec_input()
        .with_exec_output()
    }

    /// Exec node that records its int input (data pin 1) when it runs
    pub fn recording_int_descriptor(sink: Rc<RefCell<Vec<i32>>>) -> NodeDescriptor {
        NodeDescriptor::new(NodeCategory::Debug, "Record Int", move |node| {
            sink.borrow_mut().push(node.input_int(1, -1));
        })
        .with_exec_input()
        .with_input("Value", 0)
    }
}
