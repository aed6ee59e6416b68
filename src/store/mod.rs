// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Persistence for flow graphs on disk.
//!
//! Each flow variant owns one JSON slot file under the store root. Missing or
//! unreadable slots fall back to the built-in demo seed so the editor always
//! opens with a usable graph.

pub mod flow_store;

pub use flow_store::{FlowStore, StoreError, WriteDurability};
