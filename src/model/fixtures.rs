// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Built-in demo flows, one per variant.
//!
//! These seed first launches and are the silent fallback when a persisted
//! slot is absent or malformed. Ids are stable literals so the seeds survive
//! round-trips unchanged.

use super::graph::{Connection, FlowGraph, Node, NodeType};
use super::ids::{ConnectionId, NodeId};
use super::variant::FlowVariant;

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("fixture node id is non-empty")
}

fn cid(value: &str) -> ConnectionId {
    ConnectionId::new(value).expect("fixture connection id is non-empty")
}

pub fn demo_flow(variant: FlowVariant) -> FlowGraph {
    match variant {
        FlowVariant::CallFlow => call_flow(),
        FlowVariant::SmsFlow => sms_flow(),
        FlowVariant::KnowledgeGrid => knowledge_grid(),
    }
}

/// The starter call flow: 7 nodes, 6 connections,
/// start -> message -> condition -> {action -> end, action -> end}.
fn call_flow() -> FlowGraph {
    let mut graph = FlowGraph::new(8);

    graph.push_node(
        Node::new(nid("node_welcome"), NodeType::Start, 80.0, 260.0).with_text("Incoming call"),
    );
    graph.push_node(
        Node::new(nid("node_greeting"), NodeType::Message, 340.0, 260.0)
            .with_text("Thanks for calling Fade Station! Press 1 to book, 2 for hours."),
    );
    graph.push_node(
        Node::new(nid("node_hours_check"), NodeType::Condition, 600.0, 260.0)
            .with_text("Caller pressed 1?"),
    );
    graph.push_node(
        Node::new(nid("node_book"), NodeType::Action, 860.0, 120.0)
            .with_text("Create appointment"),
    );
    graph.push_node(
        Node::new(nid("node_voicemail"), NodeType::Action, 860.0, 400.0)
            .with_text("Take a voicemail"),
    );
    graph.push_node(
        Node::new(nid("node_booked"), NodeType::End, 1120.0, 120.0).with_text("Call complete"),
    );
    graph.push_node(
        Node::new(nid("node_hangup"), NodeType::End, 1120.0, 400.0).with_text("End call"),
    );

    graph.push_connection(Connection::new(
        cid("conn_welcome_greeting"),
        nid("node_welcome"),
        0,
        nid("node_greeting"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_greeting_check"),
        nid("node_greeting"),
        0,
        nid("node_hours_check"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_check_book"),
        nid("node_hours_check"),
        0,
        nid("node_book"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_check_voicemail"),
        nid("node_hours_check"),
        1,
        nid("node_voicemail"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_book_booked"),
        nid("node_book"),
        0,
        nid("node_booked"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_voicemail_hangup"),
        nid("node_voicemail"),
        0,
        nid("node_hangup"),
        0,
    ));

    graph
}

fn sms_flow() -> FlowGraph {
    let mut graph = FlowGraph::new(7);

    graph.push_node(
        Node::new(nid("node_sms_start"), NodeType::Start, 80.0, 220.0)
            .with_text("New text message"),
    );
    graph.push_node(
        Node::new(nid("node_sms_welcome"), NodeType::Message, 340.0, 220.0)
            .with_text("Hey! It's Fade Station. Reply BOOK for an appointment or HOURS for opening times."),
    );
    graph.push_node(
        Node::new(nid("node_sms_intent"), NodeType::Condition, 600.0, 220.0)
            .with_text("Reply contains BOOK?"),
    );
    graph.push_node(
        Node::new(nid("node_sms_book"), NodeType::Action, 860.0, 100.0)
            .with_text("Send booking link"),
    );
    graph.push_node(
        Node::new(nid("node_sms_done"), NodeType::End, 1120.0, 100.0)
            .with_text("Conversation closed"),
    );
    graph.push_node(
        Node::new(nid("node_sms_hours"), NodeType::Message, 860.0, 340.0)
            .with_text("We're open Tue-Sat, 9am-7pm. Walk-ins welcome before noon."),
    );

    graph.push_connection(Connection::new(
        cid("conn_sms_start_welcome"),
        nid("node_sms_start"),
        0,
        nid("node_sms_welcome"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_sms_welcome_intent"),
        nid("node_sms_welcome"),
        0,
        nid("node_sms_intent"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_sms_intent_book"),
        nid("node_sms_intent"),
        0,
        nid("node_sms_book"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_sms_book_done"),
        nid("node_sms_book"),
        0,
        nid("node_sms_done"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_sms_intent_hours"),
        nid("node_sms_intent"),
        1,
        nid("node_sms_hours"),
        0,
    ));

    graph
}

/// Knowledge cards for the read-only grid. Positions here are placeholders;
/// the grid layout rewrites them from the container size.
fn knowledge_grid() -> FlowGraph {
    let mut graph = FlowGraph::new(6);

    let cards: [(&str, &str); 5] = [
        (
            "node_kb_services",
            "Services: fades, tapers, beard trims, hot towel shaves.",
        ),
        (
            "node_kb_hours",
            "Hours: Tue-Sat 9am-7pm, closed Sun and Mon.",
        ),
        ("node_kb_pricing", "Pricing: cuts from $35, beard trim $15."),
        (
            "node_kb_location",
            "Location: 412 Clipper Ave, next to the bakery.",
        ),
        (
            "node_kb_cancellation",
            "Cancellations: free up to 2 hours before the appointment.",
        ),
    ];

    for (idx, (id, text)) in cards.iter().enumerate() {
        let x = 80.0 + (idx % 3) as f64 * 260.0;
        let y = 80.0 + (idx / 3) as f64 * 200.0;
        graph.push_node(Node::new(nid(id), NodeType::Message, x, y).with_text(*text));
    }

    graph.push_connection(Connection::new(
        cid("conn_kb_services_pricing"),
        nid("node_kb_services"),
        0,
        nid("node_kb_pricing"),
        0,
    ));
    graph.push_connection(Connection::new(
        cid("conn_kb_hours_cancellation"),
        nid("node_kb_hours"),
        0,
        nid("node_kb_cancellation"),
        0,
    ));

    graph
}
