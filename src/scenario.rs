//! Scenario files for the binaries
//!
//! A scenario is TOML or JSON, chosen by file extension.

use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::GraphError;
use crate::network::{PathGraph, Weight};

/// One undirected edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub u: String,
    pub v: String,
    pub weight: Weight,
}

/// Graph plus an optional default query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphScenario {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    pub edges: Vec<EdgeSpec>,
}

impl GraphScenario {
    pub fn build(&self) -> Result<PathGraph<String>, GraphError> {
        PathGraph::from_edges(
            self.edges
                .iter()
                .map(|e| (e.u.clone(), e.v.clone(), e.weight)),
        )
    }
}

/// Per-subject budget and each citizen's approved subjects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetScenario {
    pub budget: Vec<f64>,
    pub preferences: Vec<BTreeSet<usize>>,
}

/// Read a scenario, picking the format from the extension
pub fn load<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if !matches!(extension, "toml" | "json") {
        return Err(eyre!(
            "unsupported scenario format {:?} for {} (expected .toml or .json)",
            extension,
            path.display()
        ));
    }

    let content = fs::read_to_string(path)?;
    if extension == "toml" {
        Ok(toml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}
