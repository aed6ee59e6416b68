// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

use rstest::rstest;

use super::{port_position, Cursor, EditOutcome, Editor, Hit, PortKind, PORT_HIT_RADIUS};
use crate::model::{FlowGraph, GraphError, Node, NodeId, NodeType};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).unwrap()
}

/// A start node at (0,0) and a message node at (400,0), default 180x120.
fn start_message_editor() -> (Editor, NodeId, NodeId) {
    let mut graph = FlowGraph::new(1);
    let a = nid("node_a");
    let b = nid("node_b");
    graph.push_node(Node::new(a.clone(), NodeType::Start, 0.0, 0.0));
    graph.push_node(Node::new(b.clone(), NodeType::Message, 400.0, 0.0));
    (Editor::new(graph, true), a, b)
}

#[rstest]
#[case::message_input(NodeType::Message, PortKind::Input, 0, 1, (0.0, 60.0))]
#[case::message_output(NodeType::Message, PortKind::Output, 0, 1, (180.0, 60.0))]
#[case::condition_first_output(NodeType::Condition, PortKind::Output, 0, 2, (180.0, 40.0))]
#[case::condition_second_output(NodeType::Condition, PortKind::Output, 1, 2, (180.0, 80.0))]
fn ports_sit_on_the_node_edges(
    #[case] node_type: NodeType,
    #[case] kind: PortKind,
    #[case] index: usize,
    #[case] count: usize,
    #[case] expected: (f64, f64),
) {
    assert_eq!(
        match kind {
            PortKind::Input => node_type.inputs(),
            PortKind::Output => node_type.outputs(),
        },
        count
    );
    let node = Node::new(nid("node_p"), node_type, 0.0, 0.0);
    let (px, py) = port_position(&node, kind, index);
    assert!((px - expected.0).abs() < 1e-9);
    assert!((py - expected.1).abs() < 1e-9);
}

#[test]
fn hit_test_prefers_ports_over_bodies() {
    let (editor, _, b) = start_message_editor();
    // Exactly on the message node's input port, which lies on its body edge.
    assert_eq!(
        editor.hit_test(400.0, 60.0),
        Hit::Port {
            node_id: b.clone(),
            kind: PortKind::Input,
            index: 0
        }
    );
    // Just outside the body but within the hit radius.
    assert_eq!(
        editor.hit_test(400.0 - PORT_HIT_RADIUS / 2.0, 60.0),
        Hit::Port {
            node_id: b,
            kind: PortKind::Input,
            index: 0
        }
    );
    assert_eq!(editor.hit_test(1000.0, 500.0), Hit::Canvas);
}

#[test]
fn two_clicks_connect_output_to_input() {
    let (mut editor, a, b) = start_message_editor();

    // Click A's single output port.
    let outcome = editor.pointer_down(180.0, 60.0);
    assert_eq!(
        outcome,
        EditOutcome::ConnectStarted {
            from_node: a.clone(),
            from_port: 0
        }
    );
    assert_eq!(editor.cursor(), Cursor::Crosshair);
    editor.pointer_up();
    assert!(editor.pending_connection().is_some());

    // Click B's input port.
    let outcome = editor.pointer_down(400.0, 60.0);
    let EditOutcome::Connected(_) = outcome else {
        panic!("expected a connection, got {outcome:?}");
    };
    assert!(editor.pending_connection().is_none());
    assert_eq!(editor.cursor(), Cursor::Default);

    let conns = editor.graph().connections();
    assert_eq!(conns.len(), 1);
    assert_eq!(conns[0].from_node(), &a);
    assert_eq!(conns[0].from_port(), 0);
    assert_eq!(conns[0].to_node(), &b);
    assert_eq!(conns[0].to_port(), 0);
    assert!(editor.is_dirty());
}

#[test]
fn canvas_click_cancels_a_pending_connection() {
    let (mut editor, ..) = start_message_editor();

    editor.pointer_down(180.0, 60.0);
    assert!(editor.pending_connection().is_some());

    let outcome = editor.pointer_down(700.0, 400.0);
    assert_eq!(outcome, EditOutcome::ConnectCanceled);
    assert!(editor.pending_connection().is_none());
    assert!(editor.graph().connections().is_empty());
}

#[test]
fn second_output_click_rearms_the_pending_source() {
    let mut graph = FlowGraph::new(1);
    let cond = nid("node_cond");
    let end = nid("node_end");
    graph.push_node(Node::new(cond.clone(), NodeType::Condition, 0.0, 0.0));
    graph.push_node(Node::new(end.clone(), NodeType::End, 400.0, 0.0));
    let mut editor = Editor::new(graph, true);

    // Arm on the condition's first output, then re-arm on its second.
    editor.pointer_down(180.0, 40.0);
    editor.pointer_down(180.0, 80.0);
    assert_eq!(editor.pending_connection(), Some((&cond, 1)));

    let EditOutcome::Connected(_) = editor.pointer_down(400.0, 60.0) else {
        panic!("expected connection from re-armed port");
    };
    assert_eq!(editor.graph().connections()[0].from_port(), 1);
}

#[test]
fn dangling_input_click_without_pending_selects_the_node() {
    let (mut editor, _, b) = start_message_editor();
    let outcome = editor.pointer_down(400.0, 60.0);
    assert_eq!(outcome, EditOutcome::Selected(b.clone()));
    assert_eq!(editor.selected(), Some(&b));
    assert!(editor.graph().connections().is_empty());

    // Drags start on the node body only, never on a port.
    assert!(!editor.is_dragging());
    editor.pointer_move(600.0, 300.0);
    let node = editor.graph().node(&b).unwrap();
    assert_eq!((node.x(), node.y()), (400.0, 0.0));
}

#[test]
fn body_click_during_pending_cancels_and_selects_in_one_click() {
    let (mut editor, _, b) = start_message_editor();
    editor.pointer_down(180.0, 60.0);
    assert!(editor.pending_connection().is_some());

    // The message body, clear of both of its ports.
    let outcome = editor.pointer_down(480.0, 20.0);
    assert_eq!(outcome, EditOutcome::ConnectCanceled);
    assert_eq!(editor.selected(), Some(&b));
    assert!(editor.pending_connection().is_none());
    assert!(!editor.is_dragging());
    assert!(editor.graph().connections().is_empty());
}

#[test]
fn drag_moves_the_node_by_the_grab_offset() {
    let (mut editor, _, b) = start_message_editor();

    // Grab the message body 20x10 inside its corner.
    editor.pointer_down(420.0, 10.0);
    assert!(editor.is_dragging());
    editor.pointer_move(500.0, 100.0);
    let node = editor.graph().node(&b).unwrap();
    assert_eq!((node.x(), node.y()), (480.0, 90.0));

    editor.pointer_move(300.0, 50.0);
    let node = editor.graph().node(&b).unwrap();
    assert_eq!((node.x(), node.y()), (280.0, 40.0));

    editor.pointer_up();
    assert!(!editor.is_dragging());

    // Moves after release are ignored.
    editor.pointer_move(900.0, 900.0);
    let node = editor.graph().node(&b).unwrap();
    assert_eq!((node.x(), node.y()), (280.0, 40.0));
}

#[test]
fn cancel_gesture_keeps_the_last_processed_position() {
    let (mut editor, _, b) = start_message_editor();
    editor.pointer_down(420.0, 10.0);
    editor.pointer_move(500.0, 100.0);

    assert!(editor.cancel_gesture());
    assert!(!editor.is_dragging());
    let node = editor.graph().node(&b).unwrap();
    assert_eq!((node.x(), node.y()), (480.0, 90.0));
    assert!(!editor.cancel_gesture());
}

#[test]
fn connect_rejection_surfaces_and_clears_pending() {
    let mut graph = FlowGraph::new(1);
    let a = nid("node_a");
    let b = nid("node_b");
    graph.push_node(Node::new(a.clone(), NodeType::Message, 0.0, 0.0));
    graph.push_node(Node::new(b.clone(), NodeType::Message, 400.0, 0.0));
    let mut editor = Editor::new(graph, true);

    editor.pointer_down(180.0, 60.0);
    // Delete the pending source under the gesture, then complete: the
    // validated connect reports the missing endpoint.
    editor.graph_mut().delete_node(&a);
    let outcome = editor.pointer_down(400.0, 60.0);
    assert_eq!(
        outcome,
        EditOutcome::ConnectRejected(GraphError::MissingNode { node_id: a })
    );
    assert!(editor.pending_connection().is_none());
    assert!(editor.graph().connections().is_empty());
}

#[test]
fn delete_selected_cascades_and_clears_selection() {
    let (mut editor, a, b) = start_message_editor();
    editor.pointer_down(180.0, 60.0);
    editor.pointer_down(400.0, 60.0); // connect a -> b
    editor.pointer_down(450.0, 30.0); // select b
    editor.pointer_up();

    assert_eq!(editor.delete_selected(), Some(b.clone()));
    assert!(editor.graph().node(&b).is_none());
    assert!(editor.graph().connections().is_empty());
    assert_eq!(editor.selected(), None);
    assert!(editor.graph().node(&a).is_some());

    assert_eq!(editor.delete_selected(), None);
}

#[test]
fn add_node_selects_the_new_node() {
    let (mut editor, ..) = start_message_editor();
    let id = editor.add_node(NodeType::Condition, 600.0, 200.0).unwrap();
    assert_eq!(editor.selected(), Some(&id));
    let node = editor.graph().node(&id).unwrap();
    assert_eq!(node.text(), "If condition...");
}

#[test]
fn read_only_editor_selects_but_never_mutates() {
    let mut graph = FlowGraph::new(1);
    let a = nid("node_a");
    graph.push_node(Node::new(a.clone(), NodeType::Message, 0.0, 0.0));
    let mut editor = Editor::new(graph, false);

    // Body click selects but starts no drag.
    assert_eq!(editor.pointer_down(50.0, 50.0), EditOutcome::Selected(a.clone()));
    assert!(!editor.is_dragging());
    editor.pointer_move(300.0, 300.0);
    assert_eq!(editor.graph().node(&a).unwrap().x(), 0.0);

    // Output port click selects instead of arming a connection.
    assert_eq!(editor.pointer_down(180.0, 60.0), EditOutcome::Selected(a.clone()));
    assert!(editor.pending_connection().is_none());

    assert_eq!(editor.add_node(NodeType::Message, 0.0, 0.0), None);
    assert_eq!(editor.delete_selected(), None);
    assert!(!editor.set_selected_text("nope"));
    assert!(!editor.is_dirty());
}

#[test]
fn editing_selected_text_marks_dirty() {
    let (mut editor, _, b) = start_message_editor();
    editor.pointer_down(450.0, 30.0);
    editor.pointer_up();
    assert!(editor.set_selected_text("Ask for a callback number"));
    assert_eq!(
        editor.graph().node(&b).unwrap().text(),
        "Ask for a callback number"
    );
    assert!(editor.is_dirty());
}
