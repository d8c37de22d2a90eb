// SPDX-License-Identifier: MIT OR Apache-2.0
//! Comparison and boolean-logic nodes.
//!
//! The operator is itself a data input (a string like `"=="` or `"AND"`), so
//! graphs can switch comparisons without rewiring. Unknown operators yield
//! `false`.

use kestrel_script_graph::{NodeCategory, NodeDescriptor, NodeRegistry};

fn compare<T: PartialOrd>(a: &T, b: &T, op: &str) -> bool {
    match op {
        "==" => a == b,
        "!=" => a != b,
        "<" => a < b,
        "<=" => a <= b,
        ">" => a > b,
        ">=" => a >= b,
        _ => false,
    }
}

/// "Int Compare"
pub fn int_compare() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Compare, "Int Compare", |node| {
        let a = node.input_int(0, 0);
        let b = node.input_int(1, 0);
        let op = node.input_string(2, "==");
        node.set_output(0, compare(&a, &b, &op));
    })
    .with_input("A", 0)
    .with_input("B", 0)
    .with_input("Operator", "==")
    .with_output("Result", false)
}

/// "Float Compare"
pub fn float_compare() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Compare, "Float Compare", |node| {
        let a = node.input_float(0, 0.0);
        let b = node.input_float(1, 0.0);
        let op = node.input_string(2, "==");
        node.set_output(0, compare(&a, &b, &op));
    })
    .with_input("A", 0.0)
    .with_input("B", 0.0)
    .with_input("Operator", "==")
    .with_output("Result", false)
}

/// "String Compare" (lexicographic ordering)
pub fn string_compare() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Compare, "String Compare", |node| {
        let a = node.input_string(0, "");
        let b = node.input_string(1, "");
        let op = node.input_string(2, "==");
        node.set_output(0, compare(&a, &b, &op));
    })
    .with_input("A", "")
    .with_input("B", "")
    .with_input("Operator", "==")
    .with_output("Result", false)
}

/// "Bool Logic": AND / OR / XOR / NAND / NOR
pub fn bool_logic() -> NodeDescriptor {
    NodeDescriptor::new(NodeCategory::Compare, "Bool Logic", |node| {
        let a = node.input_bool(0, false);
        let b = node.input_bool(1, false);
        let op = node.input_string(2, "AND");
        let result = match op.as_str() {
            "AND" => a && b,
            "OR" => a || b,
            "XOR" => a != b,
            "NAND" => !(a && b),
            "NOR" => !(a || b),
            _ => false,
        };
        node.set_output(0, result);
    })
    .with_input("A", false)
    .with_input("B", false)
    .with_input("Operator", "AND")
    .with_output("Result", false)
}

/// Register the comparison nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(int_compare());
    registry.register(float_compare());
    registry.register(string_compare());
    registry.register(bool_logic());
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_script_graph::{NodeDescriptor, ObjectHandle, ScriptGraph, Value};

    fn evaluate(
        descriptor: &NodeDescriptor,
        a: impl Into<Value>,
        b: impl Into<Value>,
        op: &str,
    ) -> bool {
        let mut g = ScriptGraph::new(ObjectHandle::new());
        let id = g.spawn(descriptor);
        {
            let node = g.node_mut(id).unwrap();
            node.set_input(0, a.into());
            node.set_input(1, b.into());
            node.set_input(2, op);
        }
        g.force_update_all_inputs();
        g.node(id).unwrap().output(0).cloned() == Some(Value::Bool(true))
    }

    #[test]
    fn test_int_compare_operators() {
        assert!(evaluate(&int_compare(), 3, 3, "=="));
        assert!(evaluate(&int_compare(), 2, 3, "<"));
        assert!(evaluate(&int_compare(), 3, 2, ">="));
        assert!(!evaluate(&int_compare(), 3, 3, "!="));
    }

    #[test]
    fn test_string_compare_is_lexicographic() {
        assert!(evaluate(&string_compare(), "abc", "abd", "<"));
        assert!(evaluate(&string_compare(), "same", "same", "=="));
    }

    #[test]
    fn test_bool_logic_operators() {
        assert!(evaluate(&bool_logic(), true, false, "OR"));
        assert!(!evaluate(&bool_logic(), true, false, "AND"));
        assert!(evaluate(&bool_logic(), true, false, "XOR"));
        assert!(evaluate(&bool_logic(), false, false, "NOR"));
    }

    #[test]
    fn test_unknown_operator_is_false() {
        assert!(!evaluate(&int_compare(), 1, 1, "~="));
    }
}
