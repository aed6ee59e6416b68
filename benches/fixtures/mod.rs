// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use fadeflow::model::{Connection, ConnectionId, FlowGraph, Node, NodeId, NodeType};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("fadeflow_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// A chain of message nodes: start, n-2 messages, end, fully connected in
/// list order. Deterministic ids and positions.
pub fn chain_graph(node_count: usize) -> FlowGraph {
    assert!(node_count >= 2, "chain needs a start and an end");
    let mut graph = FlowGraph::new(node_count as u64 + 1);

    for index in 0..node_count {
        let node_type = if index == 0 {
            NodeType::Start
        } else if index == node_count - 1 {
            NodeType::End
        } else {
            NodeType::Message
        };
        let id = NodeId::new(format!("node_{index:04}")).expect("fixture node id");
        let x = (index % 8) as f64 * 220.0 + 40.0;
        let y = (index / 8) as f64 * 160.0 + 40.0;
        let mut node = Node::new(id, node_type, x, y);
        node.set_text(format!("Step {index}"));
        graph.push_node(node);
    }

    for index in 0..node_count - 1 {
        let id = ConnectionId::new(format!("conn_{index:04}")).expect("fixture connection id");
        let from = NodeId::new(format!("node_{index:04}")).expect("fixture node id");
        let to = NodeId::new(format!("node_{:04}", index + 1)).expect("fixture node id");
        graph.push_connection(Connection::new(id, from, 0, to, 0));
    }

    graph
}
