// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

use crate::model::FlowGraph;

/// Fixed padding between the container edge and the outermost cells.
pub const GRID_PADDING: f64 = 24.0;
/// Fixed gap between adjacent cells.
pub const GRID_GAP: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A computed grid placement, snapshotting the node count it was computed
/// for. [`GridLayout::apply`] refuses to apply a stale snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    node_count: usize,
    cols: usize,
    rows: usize,
    cells: Vec<CellRect>,
}

impl GridLayout {
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cells(&self) -> &[CellRect] {
        &self.cells
    }

    /// Rewrites node geometry (and nothing else) in list order, row-major.
    ///
    /// Returns `false` without touching the graph when the node count no
    /// longer matches the snapshot this layout was computed from.
    pub fn apply(&self, graph: &mut FlowGraph) -> bool {
        if graph.nodes().len() != self.node_count {
            return false;
        }
        for (node, cell) in graph.nodes_mut().iter_mut().zip(&self.cells) {
            node.set_position(cell.x, cell.y);
            node.set_size(cell.width, cell.height);
        }
        true
    }
}

/// Computes a uniform grid filling the container: `cols = ceil(sqrt(n))`,
/// `rows = ceil(n / cols)`, cells sized to fill the padded area minus gaps.
///
/// Returns `None` when the container (or a resulting cell) has no positive
/// extent; the caller retries on the next resize signal.
pub fn compute_grid(node_count: usize, container: ContainerSize) -> Option<GridLayout> {
    let usable_width = container.width - 2.0 * GRID_PADDING;
    let usable_height = container.height - 2.0 * GRID_PADDING;
    if usable_width <= 0.0 || usable_height <= 0.0 {
        return None;
    }

    if node_count == 0 {
        return Some(GridLayout {
            node_count: 0,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        });
    }

    let cols = (node_count as f64).sqrt().ceil() as usize;
    let rows = node_count.div_ceil(cols);

    let cell_width = (usable_width - GRID_GAP * (cols - 1) as f64) / cols as f64;
    let cell_height = (usable_height - GRID_GAP * (rows - 1) as f64) / rows as f64;
    if cell_width <= 0.0 || cell_height <= 0.0 {
        return None;
    }

    let cells = (0..node_count)
        .map(|idx| {
            let col = idx % cols;
            let row = idx / cols;
            CellRect {
                x: GRID_PADDING + col as f64 * (cell_width + GRID_GAP),
                y: GRID_PADDING + row as f64 * (cell_height + GRID_GAP),
                width: cell_width,
                height: cell_height,
            }
        })
        .collect();

    Some(GridLayout {
        node_count,
        cols,
        rows,
        cells,
    })
}
