// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Fadeflow — terminal node-graph editor for Fade Station conversation flows.
//!
//! One parameterized editor drives the three flow variants (call flow, SMS
//! flow, knowledge grid); graphs persist as JSON slots under a store folder.

pub mod editor;
pub mod layout;
pub mod model;
pub mod render;
pub mod store;
pub mod tui;
