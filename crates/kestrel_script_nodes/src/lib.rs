// SPDX-License-Identifier: MIT OR Apache-2.0
//! Builtin node library for the Kestrel visual scripting engine.
//!
//! Every node here goes through the public descriptor contract of
//! `kestrel_script_graph`; nothing in this crate touches engine internals.
//! Game-specific packs (object queries, physics, audio) register the same
//! way against the same [`NodeRegistry`].

pub mod compare;
pub mod consts;
pub mod debug;
pub mod events;
pub mod flow;
pub mod math;

use kestrel_script_graph::NodeRegistry;

/// Build a registry with every builtin node pack registered
pub fn standard_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    events::register(&mut registry);
    flow::register(&mut registry);
    consts::register(&mut registry);
    math::register(&mut registry);
    compare::register(&mut registry);
    debug::register(&mut registry);
    registry
}
