// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pin definitions for node inputs/outputs.
//!
//! A pin is identified by its index within its node's input or output list;
//! indices are stable for the lifetime of the node instance. Connections
//! reference pins by index only.

use serde::{Deserialize, Serialize};

/// What a pin carries: control flow or a data value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinKind {
    /// Execution flow sequencing
    Exec,
    /// A typed data value
    Data,
}

/// A connection point on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// Index within the owning node's input or output list
    pub index: usize,
    /// Exec or data
    pub kind: PinKind,
}

impl Pin {
    /// Create an exec pin
    pub fn exec(index: usize) -> Self {
        Self {
            index,
            kind: PinKind::Exec,
        }
    }

    /// Create a data pin
    pub fn data(index: usize) -> Self {
        Self {
            index,
            kind: PinKind::Data,
        }
    }

    /// Whether this pin carries execution flow
    pub fn is_exec(&self) -> bool {
        self.kind == PinKind::Exec
    }
}
