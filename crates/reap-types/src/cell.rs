//! Cell states and their property sets.
//!
//! A [`CellState`] is a snapshot of one grid cell as the world reports it:
//! which block occupies it, what structural family that block belongs to,
//! and an ordered list of named [`Property`] values. Crops expose their
//! growth stage through an integer property named [`AGE_PROPERTY`].

use serde::{Deserialize, Serialize};

use crate::ids::BlockId;

/// Name of the integer property that carries a crop's growth stage.
pub const AGE_PROPERTY: &str = "age";

/// Structural family of a block, as classified by the host.
///
/// Everything except [`BlockKind::Other`] is a built-in crop kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Generic farmland crop (wheat, carrots, modded crops built on it).
    Crop,
    /// Nether wart, grown on soul sand.
    NetherWart,
    /// Cocoa pods attached to jungle logs.
    Cocoa,
    /// Two-cell pitcher crop.
    PitcherCrop,
    /// Anything else, including the empty cell.
    Other,
}

impl BlockKind {
    /// Whether this family is one of the built-in crop kinds.
    pub const fn is_builtin_crop(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Value of a single cell property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Bounded integer. `value` is `None` when the state does not carry the
    /// property even though the block declares it.
    Int {
        /// Current value.
        value: Option<i32>,
        /// Declared value range.
        allowed: Vec<i32>,
    },
    /// Boolean flag.
    Bool(bool),
    /// Named variant out of a closed set.
    Enum {
        /// Current variant.
        value: String,
        /// Declared variants.
        allowed: Vec<String>,
    },
}

impl PropertyValue {
    /// Short name of the value type, used in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int { .. } => "int",
            Self::Bool(_) => "bool",
            Self::Enum { .. } => "enum",
        }
    }
}

/// A named property on a cell state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Current value and declared range.
    pub value: PropertyValue,
}

impl Property {
    /// An integer property ranging over `0..=max`, currently `value`.
    pub fn int_range(name: &str, value: i32, max: i32) -> Self {
        Self {
            name: name.to_owned(),
            value: PropertyValue::Int {
                value: Some(value),
                allowed: (0..=max).collect(),
            },
        }
    }

    /// An enum property with the given current variant.
    pub fn enumeration(name: &str, value: &str, allowed: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            value: PropertyValue::Enum {
                value: value.to_owned(),
                allowed: allowed.iter().map(|v| (*v).to_owned()).collect(),
            },
        }
    }
}

/// Snapshot of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    /// Block occupying the cell.
    pub block: BlockId,
    /// Structural family of the block.
    pub kind: BlockKind,
    /// Whether the block carries the host's "crops" tag.
    pub tagged_crop: bool,
    /// Ordered property set.
    pub properties: Vec<Property>,
}

impl CellState {
    /// A state with no properties.
    pub const fn new(block: BlockId, kind: BlockKind, tagged_crop: bool) -> Self {
        Self {
            block,
            kind,
            tagged_crop,
            properties: Vec::new(),
        }
    }

    /// The empty cell.
    pub fn air() -> Self {
        Self::new(BlockId::air(), BlockKind::Other, false)
    }

    /// Whether this is the empty cell.
    pub fn is_air(&self) -> bool {
        self.block == BlockId::air()
    }

    /// Whether this state belongs to the same block as `other`.
    pub fn is_same_block(&self, other: &Self) -> bool {
        self.block == other.block
    }

    /// Builder-style property append.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Current value of an integer property, if present and set.
    pub fn int_value(&self, name: &str) -> Option<i32> {
        match self.property(name).map(|p| &p.value) {
            Some(PropertyValue::Int { value, .. }) => *value,
            _ => None,
        }
    }

    /// Copy of this state with the integer property `name` set to `value`.
    ///
    /// Properties that are missing or not integers are left untouched.
    #[must_use]
    pub fn with_int(&self, name: &str, value: i32) -> Self {
        let mut next = self.clone();
        for property in &mut next.properties {
            if property.name == name
                && let PropertyValue::Int { value: current, .. } = &mut property.value
            {
                *current = Some(value);
            }
        }
        next
    }
}

/// Why a cell's age property could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeLookupError {
    /// The state has no property named `age`.
    #[error("no `age` property")]
    Missing,

    /// The `age` property exists but is not an integer.
    #[error("`age` property has type {found}, expected int")]
    WrongType {
        /// The type actually found.
        found: &'static str,
    },

    /// The `age` property declares no values, so maturity is undefined.
    #[error("`age` property declares no values")]
    NoDeclaredValues,
}

/// A resolved integer age property with a known maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeProperty {
    /// Largest declared value: the fully grown stage.
    pub max: i32,
}

impl AgeProperty {
    /// Find and validate the age property of `cell`.
    pub fn resolve(cell: &CellState) -> Result<Self, AgeLookupError> {
        let property = cell.property(AGE_PROPERTY).ok_or(AgeLookupError::Missing)?;
        match &property.value {
            PropertyValue::Int { allowed, .. } => allowed
                .iter()
                .copied()
                .max()
                .map(|max| Self { max })
                .ok_or(AgeLookupError::NoDeclaredValues),
            other => Err(AgeLookupError::WrongType {
                found: other.type_name(),
            }),
        }
    }

    /// Current age of `cell`, defaulting to 0 when unset.
    pub fn current(self, cell: &CellState) -> i32 {
        cell.int_value(AGE_PROPERTY).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheat(age: i32) -> CellState {
        CellState::new(BlockId::new("minecraft:wheat"), BlockKind::Crop, true)
            .with_property(Property::int_range(AGE_PROPERTY, age, 7))
    }

    #[test]
    fn resolves_age_maximum() {
        assert_eq!(AgeProperty::resolve(&wheat(3)), Ok(AgeProperty { max: 7 }));
    }

    #[test]
    fn missing_age_is_distinguished() {
        let cell = CellState::new(BlockId::new("minecraft:stone"), BlockKind::Other, false);
        assert_eq!(AgeProperty::resolve(&cell), Err(AgeLookupError::Missing));
    }

    #[test]
    fn wrong_type_age_is_distinguished() {
        let cell = CellState::new(BlockId::new("mod:odd"), BlockKind::Crop, false)
            .with_property(Property {
                name: AGE_PROPERTY.to_owned(),
                value: PropertyValue::Bool(true),
            });
        assert_eq!(
            AgeProperty::resolve(&cell),
            Err(AgeLookupError::WrongType { found: "bool" })
        );
    }

    #[test]
    fn empty_range_is_distinguished() {
        let cell = CellState::new(BlockId::new("mod:odd"), BlockKind::Crop, false)
            .with_property(Property {
                name: AGE_PROPERTY.to_owned(),
                value: PropertyValue::Int {
                    value: Some(1),
                    allowed: Vec::new(),
                },
            });
        assert_eq!(AgeProperty::resolve(&cell), Err(AgeLookupError::NoDeclaredValues));
    }

    #[test]
    fn unset_age_reads_as_zero() {
        let cell = CellState::new(BlockId::new("mod:odd"), BlockKind::Crop, false)
            .with_property(Property {
                name: AGE_PROPERTY.to_owned(),
                value: PropertyValue::Int {
                    value: None,
                    allowed: vec![0, 1, 2],
                },
            });
        let age = AgeProperty::resolve(&cell);
        assert_eq!(age.map(|a| a.current(&cell)), Ok(0));
    }

    #[test]
    fn same_block_ignores_properties() {
        assert!(wheat(7).is_same_block(&wheat(0)));
        let carrots = CellState::new(BlockId::new("minecraft:carrots"), BlockKind::Crop, true);
        assert!(!wheat(7).is_same_block(&carrots));
    }

    #[test]
    fn with_int_only_touches_named_property() {
        let cell = wheat(7).with_property(Property::int_range("moisture", 5, 7));
        let reset = cell.with_int(AGE_PROPERTY, 0);
        assert_eq!(reset.int_value(AGE_PROPERTY), Some(0));
        assert_eq!(reset.int_value("moisture"), Some(5));
    }
}
