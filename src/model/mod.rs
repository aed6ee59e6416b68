// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Graph model: typed ids, nodes, connections, flow variants and demo seeds.

pub mod fixtures;
pub mod graph;
pub mod ids;
pub mod variant;

pub use fixtures::demo_flow;
pub use graph::{
    Connection, FlowGraph, GraphError, Node, NodeType, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH,
};
pub use ids::{generate_id, ConnectionId, Id, IdError, NodeId};
pub use variant::{FlowVariant, LayoutMode, ParseFlowVariantError};
