// SPDX-License-Identifier: MIT OR Apache-2.0
//! Arithmetic nodes.
//!
//! Pure data nodes over int and float pairs. Division by zero yields zero
//! rather than failing the graph.

use kestrel_script_graph::{NodeCategory, NodeDescriptor, NodeRegistry};

fn binary_int(title: &str, op: impl Fn(i32, i32) -> i32 + 'static) -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Math, title, move |node| {
        let a = node.input_int(0, 0);
        let b = node.input_int(1, 0);
        node.set_output(0, op(a, b));
    })
    .with_input("A", 0)
    .with_input("B", 0)
    .with_output("Result", 0)
}

fn binary_float(title: &str, op: impl Fn(f32, f32) -> f32 + 'static) -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Math, title, move |node| {
        let a = node.input_float(0, 0.0);
        let b = node.input_float(1, 0.0);
        node.set_output(0, op(a, b));
    })
    .with_input("A", 0.0)
    .with_input("B", 0.0)
    .with_output("Result", 0.0)
}

/// "Add Int"
pub fn add_int() -> NodeDescriptor {
    binary_int("Add Int", |a, b| a.wrapping_add(b))
}

/// "Subtract Int"
pub fn subtract_int() -> NodeDescriptor {
    binary_int("Subtract Int", |a, b| a.wrapping_sub(b))
}

/// "Multiply Int"
pub fn multiply_int() -> NodeDescriptor {
    binary_int("Multiply Int", |a, b| a.wrapping_mul(b))
}

/// "Divide Int": zero divisor yields zero
pub fn divide_int() -> NodeDescriptor {
    binary_int("Divide Int", |a, b| if b != 0 { a / b } else { 0 })
}

/// "Add Float"
pub fn add_float() -> NodeDescriptor {
    binary_float("Add Float", |a, b| a + b)
}

/// "Subtract Float"
pub fn subtract_float() -> NodeDescriptor {
    binary_float("Subtract Float", |a, b| a - b)
}

/// "Multiply Float"
pub fn multiply_float() -> NodeDescriptor {
    binary_float("Multiply Float", |a, b| a * b)
}

/// "Divide Float": zero divisor yields zero
pub fn divide_float() -> NodeDescriptor {
    binary_float("Divide Float", |a, b| if b != 0.0 { a / b } else { 0.0 })
}

/// Register the arithmetic nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(add_int());
    registry.register(subtract_int());
    registry.register(multiply_int());
    registry.register(divide_int());
    registry.register(add_float());
    registry.register(subtract_float());
    registry.register(multiply_float());
    registry.register(divide_float());
}
