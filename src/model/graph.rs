// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{generate_id, ConnectionId, NodeId};

pub const DEFAULT_NODE_WIDTH: f64 = 180.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 120.0;

/// Node kind. Determines visual treatment and the port cardinality table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    Message,
    Condition,
    Action,
    End,
}

impl NodeType {
    /// Number of input ports on the left edge.
    pub fn inputs(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Message | Self::Condition | Self::Action | Self::End => 1,
        }
    }

    /// Number of output ports on the right edge.
    pub fn outputs(self) -> usize {
        match self {
            Self::Start | Self::Message | Self::Action => 1,
            Self::Condition => 2,
            Self::End => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Message => "message",
            Self::Condition => "condition",
            Self::Action => "action",
            Self::End => "end",
        }
    }

    fn default_text(self) -> &'static str {
        match self {
            Self::Message => "Enter message...",
            Self::Condition => "If condition...",
            Self::Start | Self::Action | Self::End => "",
        }
    }
}

/// A typed, positioned, labeled vertex. Geometry is canvas-local pixels with
/// `x`/`y` at the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    #[serde(rename = "type")]
    node_type: NodeType,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    text: String,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType, x: f64, y: f64) -> Self {
        Self {
            id,
            node_type,
            x,
            y,
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
            text: node_type.default_text().to_owned(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether the canvas point lies inside the node rectangle.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// A directed, port-indexed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    id: ConnectionId,
    from_node: NodeId,
    to_node: NodeId,
    from_port: usize,
    to_port: usize,
}

impl Connection {
    /// Builds a connection with an explicit id (seeded content). Port bounds
    /// are not checked here; `FlowGraph::connect` is the validated path.
    pub fn new(
        id: ConnectionId,
        from_node: NodeId,
        from_port: usize,
        to_node: NodeId,
        to_port: usize,
    ) -> Self {
        Self {
            id,
            from_node,
            to_node,
            from_port,
            to_port,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn from_node(&self) -> &NodeId {
        &self.from_node
    }

    pub fn to_node(&self) -> &NodeId {
        &self.to_node
    }

    pub fn from_port(&self) -> usize {
        self.from_port
    }

    pub fn to_port(&self) -> usize {
        self.to_port
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    MissingNode {
        node_id: NodeId,
    },
    OutputPortOutOfRange {
        node_id: NodeId,
        node_type: NodeType,
        port: usize,
    },
    InputPortOutOfRange {
        node_id: NodeId,
        node_type: NodeType,
        port: usize,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { node_id } => write!(f, "node not found (id={node_id})"),
            Self::OutputPortOutOfRange {
                node_id,
                node_type,
                port,
            } => write!(
                f,
                "output port {port} out of range for {} node {node_id} ({} outputs)",
                node_type.label(),
                node_type.outputs()
            ),
            Self::InputPortOutOfRange {
                node_id,
                node_type,
                port,
            } => write!(
                f,
                "input port {port} out of range for {} node {node_id} ({} inputs)",
                node_type.label(),
                node_type.inputs()
            ),
        }
    }
}

impl std::error::Error for GraphError {}

/// The persisted aggregate: ordered nodes and connections plus the advisory
/// legacy id counter.
///
/// Node order affects only grid-layout placement. `next_id` round-trips
/// verbatim but is never consulted by the time-based id generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGraph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    next_id: u64,
}

impl FlowGraph {
    pub fn new(next_id: u64) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            next_id,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id() == id)
    }

    /// Appends a pre-built node (seeding and fixtures).
    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Appends a pre-built connection without validation (seeding; the seeds
    /// are checked by tests against the cardinality table).
    pub fn push_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Adds a node of the given type at the given canvas position with
    /// type-appropriate default text and the default 180x120 size.
    pub fn add_node(&mut self, node_type: NodeType, x: f64, y: f64) -> NodeId {
        let id: NodeId = generate_id("node");
        self.nodes.push(Node::new(id.clone(), node_type, x, y));
        id
    }

    /// Removes the node and every connection referencing it on either end.
    /// Deleting an unknown id is a no-op; returns whether a node was removed.
    pub fn delete_node(&mut self, id: &NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.id() != id);
        if self.nodes.len() == before {
            return false;
        }
        self.connections
            .retain(|conn| conn.from_node() != id && conn.to_node() != id);
        true
    }

    /// Replaces the text of the node with the given id; no-op if not found.
    pub fn update_node_text(&mut self, id: &NodeId, text: impl Into<String>) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Creates a connection after validating both endpoints and both port
    /// indices against the endpoint types' cardinality table.
    pub fn connect(
        &mut self,
        from: &NodeId,
        from_port: usize,
        to: &NodeId,
        to_port: usize,
    ) -> Result<ConnectionId, GraphError> {
        let from_type = self
            .node(from)
            .map(Node::node_type)
            .ok_or_else(|| GraphError::MissingNode {
                node_id: from.clone(),
            })?;
        let to_type = self
            .node(to)
            .map(Node::node_type)
            .ok_or_else(|| GraphError::MissingNode {
                node_id: to.clone(),
            })?;

        if from_port >= from_type.outputs() {
            return Err(GraphError::OutputPortOutOfRange {
                node_id: from.clone(),
                node_type: from_type,
                port: from_port,
            });
        }
        if to_port >= to_type.inputs() {
            return Err(GraphError::InputPortOutOfRange {
                node_id: to.clone(),
                node_type: to_type,
                port: to_port,
            });
        }

        let id: ConnectionId = generate_id("conn");
        self.connections.push(Connection {
            id: id.clone(),
            from_node: from.clone(),
            to_node: to.clone(),
            from_port,
            to_port,
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{FlowGraph, GraphError, Node, NodeType, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};
    use crate::model::NodeId;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn node_gets_type_defaults() {
        let message = Node::new(nid("n1"), NodeType::Message, 10.0, 20.0);
        assert_eq!(message.text(), "Enter message...");
        assert_eq!(message.width(), DEFAULT_NODE_WIDTH);
        assert_eq!(message.height(), DEFAULT_NODE_HEIGHT);

        let condition = Node::new(nid("n2"), NodeType::Condition, 0.0, 0.0);
        assert_eq!(condition.text(), "If condition...");

        let action = Node::new(nid("n3"), NodeType::Action, 0.0, 0.0);
        assert_eq!(action.text(), "");
    }

    #[test]
    fn port_cardinality_table() {
        assert_eq!(
            (NodeType::Start.inputs(), NodeType::Start.outputs()),
            (0, 1)
        );
        assert_eq!(
            (NodeType::Message.inputs(), NodeType::Message.outputs()),
            (1, 1)
        );
        assert_eq!(
            (NodeType::Condition.inputs(), NodeType::Condition.outputs()),
            (1, 2)
        );
        assert_eq!(
            (NodeType::Action.inputs(), NodeType::Action.outputs()),
            (1, 1)
        );
        assert_eq!((NodeType::End.inputs(), NodeType::End.outputs()), (1, 0));
    }

    #[test]
    fn add_node_appends_with_generated_id() {
        let mut graph = FlowGraph::new(1);
        let id = graph.add_node(NodeType::Message, 40.0, 60.0);
        assert!(id.as_str().starts_with("node_"));
        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.node(&id).unwrap().x(), 40.0);
    }

    #[test]
    fn connect_validates_port_bounds() {
        let mut graph = FlowGraph::new(1);
        let start = graph.add_node(NodeType::Start, 0.0, 0.0);
        let cond = graph.add_node(NodeType::Condition, 300.0, 0.0);
        let end = graph.add_node(NodeType::End, 600.0, 0.0);

        graph.connect(&start, 0, &cond, 0).expect("valid connection");
        graph.connect(&cond, 1, &end, 0).expect("second output of condition");

        // start has a single output
        let err = graph.connect(&start, 1, &cond, 0).unwrap_err();
        assert!(matches!(err, GraphError::OutputPortOutOfRange { port: 1, .. }));

        // end has no outputs at all
        let err = graph.connect(&end, 0, &cond, 0).unwrap_err();
        assert!(matches!(err, GraphError::OutputPortOutOfRange { port: 0, .. }));

        // start accepts no inputs
        let err = graph.connect(&cond, 0, &start, 0).unwrap_err();
        assert!(matches!(err, GraphError::InputPortOutOfRange { port: 0, .. }));

        assert_eq!(graph.connections().len(), 2);
    }

    #[test]
    fn connect_rejects_missing_endpoints() {
        let mut graph = FlowGraph::new(1);
        let start = graph.add_node(NodeType::Start, 0.0, 0.0);
        let ghost = nid("node_ghost");

        let err = graph.connect(&start, 0, &ghost, 0).unwrap_err();
        assert_eq!(err, GraphError::MissingNode { node_id: ghost });
    }

    #[test]
    fn delete_node_cascades_connections_on_both_ends() {
        let mut graph = FlowGraph::new(1);
        let a = graph.add_node(NodeType::Start, 0.0, 0.0);
        let b = graph.add_node(NodeType::Message, 300.0, 0.0);
        let c = graph.add_node(NodeType::End, 600.0, 0.0);
        graph.connect(&a, 0, &b, 0).unwrap();
        graph.connect(&b, 0, &c, 0).unwrap();

        assert!(graph.delete_node(&b));

        assert!(graph.node(&b).is_none());
        assert!(graph
            .connections()
            .iter()
            .all(|conn| conn.from_node() != &b && conn.to_node() != &b));
        assert!(graph.connections().is_empty());
        assert_eq!(graph.nodes().len(), 2);
    }

    #[test]
    fn delete_node_is_idempotent() {
        let mut graph = FlowGraph::new(1);
        let a = graph.add_node(NodeType::Start, 0.0, 0.0);
        assert!(graph.delete_node(&a));
        assert!(!graph.delete_node(&a));
        assert!(!graph.delete_node(&nid("node_ghost")));
    }

    #[test]
    fn update_node_text_is_noop_on_unknown_id() {
        let mut graph = FlowGraph::new(1);
        let a = graph.add_node(NodeType::Message, 0.0, 0.0);
        assert!(graph.update_node_text(&a, "Welcome to Fade Station"));
        assert_eq!(graph.node(&a).unwrap().text(), "Welcome to Fade Station");
        assert!(!graph.update_node_text(&nid("node_ghost"), "x"));
    }

    #[test]
    fn wire_format_matches_persisted_shape() {
        let mut graph = FlowGraph::new(3);
        let a = graph.add_node(NodeType::Start, 1.5, 2.0);
        let b = graph.add_node(NodeType::Message, 300.0, 2.0);
        graph.connect(&a, 0, &b, 0).unwrap();

        let json: serde_json::Value = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nextId"], 3);
        assert_eq!(json["nodes"][0]["type"], "start");
        assert_eq!(json["nodes"][0]["x"], 1.5);
        assert_eq!(json["nodes"][0]["width"], 180.0);
        assert_eq!(json["connections"][0]["fromNode"], a.as_str());
        assert_eq!(json["connections"][0]["toNode"], b.as_str());
        assert_eq!(json["connections"][0]["fromPort"], 0);
        assert_eq!(json["connections"][0]["toPort"], 0);
    }
}
