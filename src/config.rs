//! Graph construction settings

use crate::error::{GraphError, GraphResult};
use crate::id::IdGeneratorKind;
use serde::{Deserialize, Serialize};

/// Id allocation strategy for the vertices and edges of a graph
///
/// ```json
/// { "vertex_ids": "list", "edge_ids": "max" }
/// ```
///
/// Missing fields fall back to the `set` strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Generator used for vertex ids
    pub vertex_ids: IdGeneratorKind,
    /// Generator used for edge ids
    pub edge_ids: IdGeneratorKind,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            vertex_ids: IdGeneratorKind::Set,
            edge_ids: IdGeneratorKind::Set,
        }
    }
}

impl GraphConfig {
    /// Same strategy for both id namespaces
    pub fn uniform(kind: IdGeneratorKind) -> Self {
        Self {
            vertex_ids: kind,
            edge_ids: kind,
        }
    }

    pub fn with_vertex_ids(mut self, kind: IdGeneratorKind) -> Self {
        self.vertex_ids = kind;
        self
    }

    pub fn with_edge_ids(mut self, kind: IdGeneratorKind) -> Self {
        self.edge_ids = kind;
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json(text: &str) -> GraphResult<Self> {
        serde_json::from_str(text).map_err(|err| GraphError::InvalidConfig(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GraphConfig::default();
        assert_eq!(config.vertex_ids, IdGeneratorKind::Set);
        assert_eq!(config.edge_ids, IdGeneratorKind::Set);
    }

    #[test]
    fn test_builder() {
        let config = GraphConfig::uniform(IdGeneratorKind::Max).with_edge_ids(IdGeneratorKind::List);
        assert_eq!(config.vertex_ids, IdGeneratorKind::Max);
        assert_eq!(config.edge_ids, IdGeneratorKind::List);
    }

    #[test]
    fn test_from_json() {
        let config = GraphConfig::from_json(r#"{ "vertex_ids": "list" }"#).unwrap();
        assert_eq!(config.vertex_ids, IdGeneratorKind::List);
        assert_eq!(config.edge_ids, IdGeneratorKind::Set);

        let err = GraphConfig::from_json(r#"{ "vertex_ids": "tutu" }"#).unwrap_err();
        assert!(matches!(err, GraphError::InvalidConfig(_)));
    }
}
