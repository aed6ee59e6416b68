// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

use smallvec::SmallVec;

use crate::model::{Connection, Node};

/// Horizontal offset of each Bezier control point from its endpoint.
pub const CONTROL_OFFSET: f64 = 50.0;

fn find_node<'a>(nodes: &'a [Node], id: &crate::model::NodeId) -> Option<&'a Node> {
    nodes.iter().find(|node| node.id() == id)
}

/// The four control points of the connection's cubic Bezier: right-center of
/// the source, two symmetric horizontal control points, left-center of the
/// target. `None` when either endpoint node is missing (a dangling
/// connection renders as nothing until deletion cleanup prunes it).
pub fn connection_points(connection: &Connection, nodes: &[Node]) -> Option<[(f64, f64); 4]> {
    let from = find_node(nodes, connection.from_node())?;
    let to = find_node(nodes, connection.to_node())?;

    let start = (from.x() + from.width(), from.y() + from.height() / 2.0);
    let end = (to.x(), to.y() + to.height() / 2.0);

    Some([
        start,
        (start.0 + CONTROL_OFFSET, start.1),
        (end.0 - CONTROL_OFFSET, end.1),
        end,
    ])
}

/// SVG-style path string for the connection, recomputed per render since it
/// depends on live node positions. Empty string for dangling connections.
pub fn connection_path(connection: &Connection, nodes: &[Node]) -> String {
    match connection_points(connection, nodes) {
        Some([p0, c1, c2, p3]) => format!(
            "M {} {} C {} {}, {} {}, {} {}",
            p0.0, p0.1, c1.0, c1.1, c2.0, c2.1, p3.0, p3.1
        ),
        None => String::new(),
    }
}

/// Evaluates the cubic Bezier at `t` in `[0, 1]`.
pub fn cubic_point(points: &[(f64, f64); 4], t: f64) -> (f64, f64) {
    let [p0, p1, p2, p3] = points;
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    (
        b0 * p0.0 + b1 * p1.0 + b2 * p2.0 + b3 * p3.0,
        b0 * p0.1 + b1 * p1.1 + b2 * p2.1 + b3 * p3.1,
    )
}

/// Samples the connection curve into `segments + 1` points for the terminal
/// canvas. Empty for dangling connections.
pub fn sample_connection(
    connection: &Connection,
    nodes: &[Node],
    segments: usize,
) -> SmallVec<[(f64, f64); 24]> {
    let mut out = SmallVec::new();
    let Some(points) = connection_points(connection, nodes) else {
        return out;
    };
    let segments = segments.max(1);
    for step in 0..=segments {
        let t = step as f64 / segments as f64;
        out.push(cubic_point(&points, t));
    }
    out
}
