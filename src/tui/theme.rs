// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

use ratatui::style::{Color, Modifier, Style};

use crate::model::NodeType;

pub(crate) const CONNECTION_COLOR: Color = Color::DarkGray;
pub(crate) const PENDING_COLOR: Color = Color::Yellow;
pub(crate) const SELECTION_COLOR: Color = Color::White;
pub(crate) const PORT_COLOR: Color = Color::Gray;
pub(crate) const FOOTER_LABEL_COLOR: Color = Color::Gray;
pub(crate) const FOOTER_KEY_COLOR: Color = Color::Cyan;

pub(crate) fn node_color(node_type: NodeType) -> Color {
    match node_type {
        NodeType::Start => Color::LightGreen,
        NodeType::Message => Color::LightBlue,
        NodeType::Condition => Color::Yellow,
        NodeType::Action => Color::LightMagenta,
        NodeType::End => Color::LightRed,
    }
}

pub(crate) fn panel_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn toast_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::LightYellow)
}

pub(crate) fn prompt_style() -> Style {
    Style::default().fg(Color::White).bg(Color::DarkGray)
}
