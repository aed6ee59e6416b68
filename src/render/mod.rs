// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Pure geometry for drawing connections.

pub mod path;

pub use path::{
    connection_path, connection_points, cubic_point, sample_connection, CONTROL_OFFSET,
};
