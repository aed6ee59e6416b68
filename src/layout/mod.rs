// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Layout strategies.
//!
//! Freeform layout is implicit (node positions are authoritative); this
//! module holds the grid auto-layout used by the read-only knowledge variant.

pub mod grid;

pub use grid::{compute_grid, CellRect, ContainerSize, GridLayout, GRID_GAP, GRID_PADDING};
