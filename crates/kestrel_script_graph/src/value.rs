// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pin payload values.
//!
//! Every data pin carries a [`Value`]: a closed set of payload types with
//! accessors that never panic. Reading a value as the wrong type returns the
//! caller-supplied default, so node bodies can stay free of error plumbing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Non-owning reference to an engine object (the entity that owns a graph,
/// or any object a node body wants to target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub Uuid);

impl ObjectHandle {
    /// Create a new random object handle
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Value that can flow through a data pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i32),
    /// Float
    Float(f32),
    /// String
    String(String),
    /// 2D vector
    Vector2([f32; 2]),
    /// 3D vector
    Vector3([f32; 3]),
    /// Object reference
    Object(ObjectHandle),
}

impl Value {
    /// Name of the payload type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Vector2(_) => "vector2",
            Self::Vector3(_) => "vector3",
            Self::Object(_) => "object",
        }
    }

    /// Read as bool, or `default` on type mismatch
    pub fn as_bool_or(&self, default: bool) -> bool {
        if let Self::Bool(b) = self { *b } else { default }
    }

    /// Read as int, or `default` on type mismatch
    pub fn as_int_or(&self, default: i32) -> i32 {
        if let Self::Int(i) = self { *i } else { default }
    }

    /// Read as float, or `default` on type mismatch
    pub fn as_float_or(&self, default: f32) -> f32 {
        if let Self::Float(f) = self { *f } else { default }
    }

    /// Read as string, or `default` on type mismatch
    pub fn as_string_or(&self, default: &str) -> String {
        if let Self::String(s) = self {
            s.clone()
        } else {
            default.to_string()
        }
    }

    /// Read as 2D vector, or `default` on type mismatch
    pub fn as_vector2_or(&self, default: [f32; 2]) -> [f32; 2] {
        if let Self::Vector2(v) = self { *v } else { default }
    }

    /// Read as 3D vector, or `default` on type mismatch
    pub fn as_vector3_or(&self, default: [f32; 3]) -> [f32; 3] {
        if let Self::Vector3(v) = self { *v } else { default }
    }

    /// Read as object handle, or `default` on type mismatch
    pub fn as_object_or(&self, default: ObjectHandle) -> ObjectHandle {
        if let Self::Object(o) = self { *o } else { default }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Vector2([x, y]) => write!(f, "({x}, {y})"),
            Self::Vector3([x, y, z]) => write!(f, "({x}, {y}, {z})"),
            Self::Object(o) => write!(f, "{}", o.0),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<[f32; 2]> for Value {
    fn from(v: [f32; 2]) -> Self {
        Self::Vector2(v)
    }
}

impl From<[f32; 3]> for Value {
    fn from(v: [f32; 3]) -> Self {
        Self::Vector3(v)
    }
}

impl From<ObjectHandle> for Value {
    fn from(v: ObjectHandle) -> Self {
        Self::Object(v)
    }
}
