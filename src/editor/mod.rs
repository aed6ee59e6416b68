// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Pointer-gesture interaction controller.
//!
//! Drives all graph mutations from canvas-pixel-space pointer events: drag to
//! move, two-click port connection, selection and deletion. The controller is
//! independent of the terminal layer; the TUI translates mouse events into
//! calls here.

use crate::model::{ConnectionId, FlowGraph, GraphError, Node, NodeId, NodeType};

/// Hit radius around a port center. Generous because terminal pointers are a
/// full cell wide.
pub const PORT_HIT_RADIUS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Input,
    Output,
}

/// Canvas-space position of a port center: inputs on the left edge, outputs
/// on the right, evenly distributed along the node height.
pub fn port_position(node: &Node, kind: PortKind, index: usize) -> (f64, f64) {
    let count = match kind {
        PortKind::Input => node.node_type().inputs(),
        PortKind::Output => node.node_type().outputs(),
    };
    let x = match kind {
        PortKind::Input => node.x(),
        PortKind::Output => node.x() + node.width(),
    };
    let y = node.y() + node.height() * (index + 1) as f64 / (count + 1) as f64;
    (x, y)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Port {
        node_id: NodeId,
        kind: PortKind,
        index: usize,
    },
    Body {
        node_id: NodeId,
    },
    Canvas,
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    DraggingNode {
        node_id: NodeId,
        grab_dx: f64,
        grab_dy: f64,
    },
    PendingConnection {
        from_node: NodeId,
        from_port: usize,
    },
}

/// Pointer affordance the surface should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
}

/// What a pointer event did, for status/toast reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    None,
    Selected(NodeId),
    SelectionCleared,
    ConnectStarted {
        from_node: NodeId,
        from_port: usize,
    },
    Connected(ConnectionId),
    ConnectRejected(GraphError),
    ConnectCanceled,
}

/// The parameterized editor: one state machine for every flow variant.
/// Read-only instances allow selection but no mutation.
#[derive(Debug)]
pub struct Editor {
    graph: FlowGraph,
    editable: bool,
    gesture: Gesture,
    selected: Option<NodeId>,
    dirty: bool,
}

impl Editor {
    pub fn new(graph: FlowGraph, editable: bool) -> Self {
        Self {
            graph,
            editable,
            gesture: Gesture::Idle,
            selected: None,
            dirty: false,
        }
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut FlowGraph {
        &mut self.graph
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_ref().and_then(|id| self.graph.node(id))
    }

    /// Pending connection source, if the two-click gesture is armed.
    pub fn pending_connection(&self) -> Option<(&NodeId, usize)> {
        match &self.gesture {
            Gesture::PendingConnection {
                from_node,
                from_port,
            } => Some((from_node, *from_port)),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::DraggingNode { .. })
    }

    pub fn cursor(&self) -> Cursor {
        match self.gesture {
            Gesture::PendingConnection { .. } => Cursor::Crosshair,
            _ => Cursor::Default,
        }
    }

    /// Whether the graph has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Topmost hit wins; nodes later in the list draw above earlier ones.
    /// Ports are checked before bodies since they straddle the node edge.
    pub fn hit_test(&self, x: f64, y: f64) -> Hit {
        for node in self.graph.nodes().iter().rev() {
            for kind in [PortKind::Output, PortKind::Input] {
                let count = match kind {
                    PortKind::Input => node.node_type().inputs(),
                    PortKind::Output => node.node_type().outputs(),
                };
                for index in 0..count {
                    let (px, py) = port_position(node, kind, index);
                    if (x - px).hypot(y - py) <= PORT_HIT_RADIUS {
                        return Hit::Port {
                            node_id: node.id().clone(),
                            kind,
                            index,
                        };
                    }
                }
            }
            if node.contains(x, y) {
                return Hit::Body {
                    node_id: node.id().clone(),
                };
            }
        }
        Hit::Canvas
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> EditOutcome {
        match self.hit_test(x, y) {
            Hit::Port {
                node_id,
                kind: PortKind::Output,
                index,
            } if self.editable => {
                // Arms (or re-arms) the pending source.
                self.gesture = Gesture::PendingConnection {
                    from_node: node_id.clone(),
                    from_port: index,
                };
                EditOutcome::ConnectStarted {
                    from_node: node_id,
                    from_port: index,
                }
            }
            Hit::Port {
                node_id,
                kind: PortKind::Input,
                index,
            } => {
                if let Gesture::PendingConnection {
                    from_node,
                    from_port,
                } = std::mem::replace(&mut self.gesture, Gesture::Idle)
                {
                    match self.graph.connect(&from_node, from_port, &node_id, index) {
                        Ok(conn_id) => {
                            self.dirty = true;
                            EditOutcome::Connected(conn_id)
                        }
                        Err(err) => EditOutcome::ConnectRejected(err),
                    }
                } else {
                    // No pending source: ports select but never start a drag.
                    self.selected = Some(node_id.clone());
                    EditOutcome::Selected(node_id)
                }
            }
            Hit::Port { node_id, .. } => {
                // Output port on a read-only surface: selection only.
                self.selected = Some(node_id.clone());
                EditOutcome::Selected(node_id)
            }
            Hit::Body { node_id } => {
                if matches!(self.gesture, Gesture::PendingConnection { .. }) {
                    // The same click cancels the pending source and selects.
                    self.gesture = Gesture::Idle;
                    self.selected = Some(node_id);
                    return EditOutcome::ConnectCanceled;
                }
                self.begin_body_gesture(node_id, x, y)
            }
            Hit::Canvas => {
                if matches!(self.gesture, Gesture::PendingConnection { .. }) {
                    self.gesture = Gesture::Idle;
                    return EditOutcome::ConnectCanceled;
                }
                if self.selected.take().is_some() {
                    EditOutcome::SelectionCleared
                } else {
                    EditOutcome::None
                }
            }
        }
    }

    fn begin_body_gesture(&mut self, node_id: NodeId, x: f64, y: f64) -> EditOutcome {
        self.selected = Some(node_id.clone());
        if self.editable {
            if let Some(node) = self.graph.node(&node_id) {
                self.gesture = Gesture::DraggingNode {
                    node_id: node_id.clone(),
                    grab_dx: x - node.x(),
                    grab_dy: y - node.y(),
                };
            }
        }
        EditOutcome::Selected(node_id)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Gesture::DraggingNode {
            node_id,
            grab_dx,
            grab_dy,
        } = &self.gesture
        else {
            return;
        };
        let (node_id, nx, ny) = (node_id.clone(), x - grab_dx, y - grab_dy);
        if let Some(node) = self.graph.node_mut(&node_id) {
            node.set_position(nx, ny);
            self.dirty = true;
        }
    }

    /// Ends a drag wherever release happens. A pending connection survives
    /// release; it is a two-click gesture.
    pub fn pointer_up(&mut self) {
        if matches!(self.gesture, Gesture::DraggingNode { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    /// Aborts any in-flight gesture (focus loss, teardown). The node keeps
    /// the last processed position; no half-formed connection exists.
    pub fn cancel_gesture(&mut self) -> bool {
        let was_active = !matches!(self.gesture, Gesture::Idle);
        self.gesture = Gesture::Idle;
        was_active
    }

    /// Adds a node at the given canvas position and selects it.
    pub fn add_node(&mut self, node_type: NodeType, x: f64, y: f64) -> Option<NodeId> {
        if !self.editable {
            return None;
        }
        let id = self.graph.add_node(node_type, x, y);
        self.selected = Some(id.clone());
        self.dirty = true;
        Some(id)
    }

    /// Deletes the selected node (cascading its connections), clearing the
    /// selection and any gesture touching it.
    pub fn delete_selected(&mut self) -> Option<NodeId> {
        if !self.editable {
            return None;
        }
        let id = self.selected.take()?;
        if !self.graph.delete_node(&id) {
            return None;
        }
        match &self.gesture {
            Gesture::DraggingNode { node_id, .. } if *node_id == id => {
                self.gesture = Gesture::Idle;
            }
            Gesture::PendingConnection { from_node, .. } if *from_node == id => {
                self.gesture = Gesture::Idle;
            }
            _ => {}
        }
        self.dirty = true;
        Some(id)
    }

    pub fn set_selected_text(&mut self, text: impl Into<String>) -> bool {
        if !self.editable {
            return false;
        }
        let Some(id) = self.selected.clone() else {
            return false;
        };
        if self.graph.update_node_text(&id, text) {
            self.dirty = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests;
