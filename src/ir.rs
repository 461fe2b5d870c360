use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One dependency record per distinct namespace observed by the analysis
/// pipeline. `level` is the rank at which the namespace was discovered,
/// not necessarily the depth it ends up at in the rendered tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub namespace: String,
    pub level: u32,
    #[serde(default)]
    pub references: Vec<String>,
}

/// Directed adjacency structure over a flat list of dependency records,
/// keyed by namespace. Built once per render and read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    records: BTreeMap<String, DependencyRecord>,
}

impl DependencyGraph {
    pub fn from_records(records: &[DependencyRecord]) -> Self {
        let mut map = BTreeMap::new();
        for record in records {
            map.insert(record.namespace.clone(), record.clone());
        }
        Self { records: map }
    }

    pub fn get(&self, namespace: &str) -> Option<&DependencyRecord> {
        self.records.get(namespace)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.records.contains_key(namespace)
    }

    /// Successors of a namespace. A namespace with no record has no
    /// successors (dangling references are dead ends).
    pub fn references_of(&self, namespace: &str) -> &[String] {
        self.records
            .get(namespace)
            .map(|record| record.references.as_slice())
            .unwrap_or(&[])
    }

    /// The record discovered at level 0, if any. Its absence yields an
    /// empty tree downstream rather than an error.
    pub fn root(&self) -> Option<&DependencyRecord> {
        self.records.values().find(|record| record.level == 0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
