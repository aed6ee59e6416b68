// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

/// Layout strategy for an editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Nodes keep user-set positions; drags are authoritative.
    Freeform,
    /// Positions and sizes are recomputed into a uniform grid on resize.
    Grid,
}

/// The three flow variants of the Fade Station app, collapsed into one
/// parameterized editor: each variant carries its persistence slot, layout
/// strategy and editability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowVariant {
    CallFlow,
    SmsFlow,
    KnowledgeGrid,
}

impl FlowVariant {
    pub const ALL: [FlowVariant; 3] = [Self::CallFlow, Self::SmsFlow, Self::KnowledgeGrid];

    /// Persistence slot key; distinct per variant so the graphs never collide.
    pub fn slot_key(self) -> &'static str {
        match self {
            Self::CallFlow => "call-flow",
            Self::SmsFlow => "sms-flow",
            Self::KnowledgeGrid => "knowledge-grid",
        }
    }

    pub fn layout_mode(self) -> LayoutMode {
        match self {
            Self::CallFlow | Self::SmsFlow => LayoutMode::Freeform,
            Self::KnowledgeGrid => LayoutMode::Grid,
        }
    }

    pub fn editable(self) -> bool {
        !matches!(self, Self::KnowledgeGrid)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CallFlow => "Call Flow",
            Self::SmsFlow => "SMS Flow",
            Self::KnowledgeGrid => "AI Knowledge",
        }
    }
}

impl fmt::Display for FlowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot_key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFlowVariantError {
    pub value: String,
}

impl fmt::Display for ParseFlowVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown flow variant {:?} (expected call, sms or knowledge)",
            self.value
        )
    }
}

impl std::error::Error for ParseFlowVariantError {}

impl FromStr for FlowVariant {
    type Err = ParseFlowVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" | "call-flow" => Ok(Self::CallFlow),
            "sms" | "sms-flow" => Ok(Self::SmsFlow),
            "knowledge" | "knowledge-grid" => Ok(Self::KnowledgeGrid),
            _ => Err(ParseFlowVariantError {
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FlowVariant, LayoutMode};

    #[test]
    fn slot_keys_are_distinct() {
        let keys: std::collections::BTreeSet<_> =
            FlowVariant::ALL.iter().map(|v| v.slot_key()).collect();
        assert_eq!(keys.len(), FlowVariant::ALL.len());
    }

    #[test]
    fn knowledge_grid_is_read_only_grid() {
        assert_eq!(FlowVariant::KnowledgeGrid.layout_mode(), LayoutMode::Grid);
        assert!(!FlowVariant::KnowledgeGrid.editable());
        assert_eq!(FlowVariant::CallFlow.layout_mode(), LayoutMode::Freeform);
        assert!(FlowVariant::CallFlow.editable());
        assert!(FlowVariant::SmsFlow.editable());
    }

    #[test]
    fn parses_short_and_slot_forms() {
        assert_eq!("call".parse(), Ok(FlowVariant::CallFlow));
        assert_eq!("sms-flow".parse(), Ok(FlowVariant::SmsFlow));
        assert_eq!("knowledge".parse(), Ok(FlowVariant::KnowledgeGrid));
        assert!("voicemail".parse::<FlowVariant>().is_err());
    }
}
