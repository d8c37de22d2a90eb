// SPDX-License-Identifier: MIT OR Apache-2.0
//! Constant/literal nodes.
//!
//! Pure data nodes that copy their (editable) default input to their output.
//! They re-evaluate eagerly on every input refresh, so a value edited in the
//! editor is visible downstream without waiting for an execution tick.

use kestrel_script_graph::{NodeCategory, NodeDescriptor, NodeRegistry};

/// "String" literal
pub fn string_const() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Constant, "String", |node| {
        let value = node.input_string(0, "Hello");
        node.set_output(0, value);
    })
    .with_input("Text", "Hello")
    .with_output("Value", "Hello")
}

/// "Int" literal
pub fn int_const() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Constant, "Int", |node| {
        let value = node.input_int(0, 0);
        node.set_output(0, value);
    })
    .with_input("Value", 0)
    .with_output("Value", 0)
}

/// "Float" literal
pub fn float_const() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Constant, "Float", |node| {
        let value = node.input_float(0, 0.0);
        node.set_output(0, value);
    })
    .with_input("Value", 0.0)
    .with_output("Value", 0.0)
}

/// "Boolean" literal
pub fn bool_const() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Constant, "Boolean", |node| {
        let value = node.input_bool(0, false);
        node.set_output(0, value);
    })
    .with_input("Value", false)
    .with_output("Value", false)
}

/// "Vector 2" built from X/Y components
pub fn vector2_const() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Constant, "Vector 2", |node| {
        let x = node.input_float(0, 0.0);
        let y = node.input_float(1, 0.0);
        node.set_output(0, [x, y]);
    })
    .with_input("X", 0.0)
    .with_input("Y", 0.0)
    .with_output("Value", [0.0, 0.0])
}

/// "Vector 3" built from X/Y/Z components
pub fn vector3_const() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Constant, "Vector 3", |node| {
        let x = node.input_float(0, 0.0);
        let y = node.input_float(1, 0.0);
        let z = node.input_float(2, 0.0);
        node.set_output(0, [x, y, z]);
    })
    .with_input("X", 0.0)
    .with_input("Y", 0.0)
    .with_input("Z", 0.0)
    .with_output("Value", [0.0, 0.0, 0.0])
}

/// Register the constant nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(string_const());
    registry.register(int_const());
    registry.register(float_const());
    registry.register(bool_const());
    registry.register(vector2_const());
    registry.register(vector3_const());
}
