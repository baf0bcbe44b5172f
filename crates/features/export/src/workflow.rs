//! Linear workflow graph export.
//!
//! Each selected record becomes one node and consecutive nodes are chained, so the graph is
//! always a single path in selection order. Branching is not modelled.

use csync_domain::Record;
use csync_domain::constants::fields;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::json;

/// Node type understood by the workflow tool importing the export.
pub const NODE_TYPE: &str = "n8n-nodes-base.set";
const NODE_SPACING: i64 = 300;
const NODE_ROW: i64 = 300;
const CONNECTION_KIND: &str = "main";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowGraph {
    pub nodes: Vec<WorkflowNode>,
    pub connections: Connections,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub position: [i64; 2],
    pub parameters: NodeParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeParameters {
    pub values: NodeValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeValues {
    pub string: Vec<NamedValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedValue {
    pub name: &'static str,
    pub value: String,
}

/// Ordered `from -> to` edges.
///
/// Serializes as `{from: {main: [[{node: to, type: "main", index: 0}]]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connections(Vec<(String, String)>);

impl Connections {
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Connections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (from, to) in &self.0 {
            let hop = json!({"node": to, "type": CONNECTION_KIND, "index": 0});
            let target = json!({ CONNECTION_KIND: [[hop]] });
            map.serialize_entry(from, &target)?;
        }
        map.end()
    }
}

#[must_use]
pub fn node_id(index: usize) -> String {
    format!("contact_{index}")
}

/// Converts records, already in selection order, into a linear graph.
#[must_use]
pub fn to_workflow_graph(records: &[Record]) -> WorkflowGraph {
    let nodes: Vec<WorkflowNode> = records.iter().enumerate().map(|(i, r)| node(i, r)).collect();
    let connections = Connections(
        nodes.windows(2).map(|pair| (pair[0].id.clone(), pair[1].id.clone())).collect(),
    );
    WorkflowGraph { nodes, connections }
}

fn node(index: usize, record: &Record) -> WorkflowNode {
    let value = |key: &str| record.text(key).unwrap_or_default();
    let name = record.full_name().unwrap_or_else(|| "Unknown".to_owned());
    let x = i64::try_from(index).map_or(i64::MAX, |i| i.saturating_mul(NODE_SPACING));

    WorkflowNode {
        id: node_id(index),
        name: format!("Contact: {name}"),
        node_type: NODE_TYPE,
        position: [x, NODE_ROW],
        parameters: NodeParameters {
            values: NodeValues {
                string: vec![
                    NamedValue { name: fields::ID, value: record.id().to_string() },
                    NamedValue { name: fields::EMAIL, value: value(fields::EMAIL) },
                    NamedValue { name: fields::FULL_NAME, value: value(fields::FULL_NAME) },
                    NamedValue { name: fields::STATUS, value: value(fields::STATUS) },
                ],
            },
        },
    }
}
