//! Tool tiers and the multi-harvest threshold.
//!
//! Tools carry a tier label (`"wood"`, `"iron"`, ...). The [`TierResolver`]
//! maps labels to ordinal levels using a sorted tier table and compares a
//! tool against the configured starting tier for multi-harvest.
//!
//! Levels:
//!
//! - `-1` -- no tool dimension applies (no tool held, or the `"none"`
//!   threshold).
//! - `0` -- unranked: a tool with no tier, or a label the table does not
//!   know. Matches the lowest vanilla tiers.
//! - `n` -- a registered tier.

use reap_types::ItemStack;

/// Level of "no tool dimension".
pub const NO_TOOL_LEVEL: i32 = -1;

/// Level of unranked tools and unresolved tier labels.
pub const UNRANKED_LEVEL: i32 = 0;

/// The configuration value that lets every hoe multi-harvest, with the area
/// growing from [`NO_TOOL_LEVEL`].
pub const NONE_SENTINEL: &str = "none";

/// What an item contributes to tier comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolReference {
    /// Not a tool.
    NoTool,
    /// A tool without a tier.
    Unranked,
    /// A tool with a tier label.
    Tier(String),
}

impl ToolReference {
    /// Derive the reference for a held item.
    pub fn of(stack: &ItemStack) -> Self {
        if stack.is_empty() {
            return Self::NoTool;
        }
        stack.tool.as_ref().map_or(Self::NoTool, |tool| {
            tool.tier
                .as_ref()
                .map_or(Self::Unranked, |label| Self::Tier(label.clone()))
        })
    }
}

/// The configured starting tier for multi-harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierThreshold {
    /// Any hoe may multi-harvest.
    None,
    /// Tools at or above this tier may multi-harvest.
    Tier(String),
}

impl TierThreshold {
    /// Parse a configuration value; `"none"` matches case-insensitively.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(NONE_SENTINEL) {
            Self::None
        } else {
            Self::Tier(value.trim().to_owned())
        }
    }
}

/// One entry of the tier table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    /// Label, matched case-insensitively.
    pub name: String,
    /// Ordinal level.
    pub level: u32,
}

/// Sorted tier table with comparison helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierResolver {
    tiers: Vec<Tier>,
}

impl Default for TierResolver {
    fn default() -> Self {
        Self::vanilla()
    }
}

impl TierResolver {
    /// A resolver over `tiers`, sorted by level.
    pub fn new(mut tiers: Vec<Tier>) -> Self {
        tiers.sort_by_key(|tier| tier.level);
        Self { tiers }
    }

    /// The vanilla tool materials: wood and gold 0, stone 1, iron 2,
    /// diamond 3, netherite 4.
    pub fn vanilla() -> Self {
        Self::new(
            [
                ("wood", 0),
                ("gold", 0),
                ("stone", 1),
                ("iron", 2),
                ("diamond", 3),
                ("netherite", 4),
            ]
            .into_iter()
            .map(|(name, level)| Tier {
                name: name.to_owned(),
                level,
            })
            .collect(),
        )
    }

    /// Tier labels from lowest to highest.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|tier| tier.name.as_str())
    }

    /// Find a tier by label.
    pub fn find(&self, label: &str) -> Option<&Tier> {
        let label = label.trim();
        self.tiers
            .iter()
            .find(|tier| tier.name.eq_ignore_ascii_case(label))
    }

    /// Level of a tool reference. Unknown labels resolve to
    /// [`UNRANKED_LEVEL`].
    pub fn level_of(&self, tool: &ToolReference) -> i32 {
        match tool {
            ToolReference::NoTool => NO_TOOL_LEVEL,
            ToolReference::Unranked => UNRANKED_LEVEL,
            ToolReference::Tier(label) => self.label_level(label),
        }
    }

    /// Level of the threshold itself. `"none"` is [`NO_TOOL_LEVEL`]; unknown
    /// labels resolve to [`UNRANKED_LEVEL`].
    pub fn threshold_level(&self, threshold: &TierThreshold) -> i32 {
        match threshold {
            TierThreshold::None => NO_TOOL_LEVEL,
            TierThreshold::Tier(label) => self.label_level(label),
        }
    }

    /// Whether `tool` may multi-harvest under `threshold`.
    pub fn is_above_threshold(&self, tool: &ToolReference, threshold: &TierThreshold) -> bool {
        match threshold {
            TierThreshold::None => true,
            TierThreshold::Tier(_) => self.level_of(tool) >= self.threshold_level(threshold),
        }
    }

    fn label_level(&self, label: &str) -> i32 {
        self.find(label)
            .map_or(UNRANKED_LEVEL, |tier| i32::try_from(tier.level).unwrap_or(i32::MAX))
    }
}
