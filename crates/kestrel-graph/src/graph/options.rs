//! Graph configuration options.
//!
//! Options are fixed at construction time. They can be built in code, taken from one of the
//! named presets, or parsed from a JSON object such as
//! `{"directed": false, "loopsAllowed": true}` (missing keys fall back to [`Default`]).

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    pub directed: bool,
    pub loops_allowed: bool,
    pub multiple_edges_allowed: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::simple_directed()
    }
}

impl GraphOptions {
    /// Undirected, no loops, no parallel edges.
    pub const fn simple() -> Self {
        Self {
            directed: false,
            loops_allowed: false,
            multiple_edges_allowed: false,
        }
    }

    /// Undirected, parallel edges but no loops.
    pub const fn multigraph() -> Self {
        Self {
            directed: false,
            loops_allowed: false,
            multiple_edges_allowed: true,
        }
    }

    /// Undirected, loops and parallel edges.
    pub const fn pseudograph() -> Self {
        Self {
            directed: false,
            loops_allowed: true,
            multiple_edges_allowed: true,
        }
    }

    pub const fn simple_directed() -> Self {
        Self {
            directed: true,
            loops_allowed: false,
            multiple_edges_allowed: false,
        }
    }

    pub const fn directed_multigraph() -> Self {
        Self {
            directed: true,
            loops_allowed: false,
            multiple_edges_allowed: true,
        }
    }

    pub const fn directed_pseudograph() -> Self {
        Self {
            directed: true,
            loops_allowed: true,
            multiple_edges_allowed: true,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
