//! Block types and immutable block states.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::error::{EditError, Result};
use crate::identifier::Identifier;
use crate::property::{Property, PropertyValue};

/// A kind of block. Its property schema is attached at most once, either at
/// construction or lazily by the platform on first use.
pub struct BlockType {
    id: Identifier,
    properties: OnceLock<Vec<Arc<Property>>>,
}

impl BlockType {
    /// A type whose schema is not known yet.
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            properties: OnceLock::new(),
        }
    }

    pub fn with_properties(id: Identifier, properties: Vec<Arc<Property>>) -> Self {
        Self {
            id,
            properties: OnceLock::from(properties),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// The schema, or an empty slice while it has not been attached.
    pub fn properties(&self) -> &[Arc<Property>] {
        self.properties.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_schema(&self) -> bool {
        self.properties.get().is_some()
    }

    /// Attach the schema unless one is already attached, and return
    /// whichever schema is now in place.
    pub fn init_properties(&self, properties: Vec<Arc<Property>>) -> &[Arc<Property>] {
        self.properties.get_or_init(|| properties)
    }

    pub fn property(&self, name: &str) -> Option<&Arc<Property>> {
        self.properties().iter().find(|p| p.name() == name)
    }

    fn position(&self, property: &Property) -> Option<usize> {
        self.properties().iter().position(|p| **p == *property)
    }
}

impl PartialEq for BlockType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BlockType {}

impl Hash for BlockType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockType")
            .field("id", &self.id)
            .field("properties", &self.properties().len())
            .finish()
    }
}

/// A block type with every property assigned. Immutable; use
/// [`with`](Self::with) to derive a changed copy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
    block_type: Arc<BlockType>,
    values: Vec<(Arc<Property>, PropertyValue)>,
}

impl BlockState {
    pub fn builder(block_type: Arc<BlockType>) -> BlockStateBuilder {
        BlockStateBuilder::new(block_type)
    }

    pub fn block_type(&self) -> &Arc<BlockType> {
        &self.block_type
    }

    pub fn id(&self) -> &Identifier {
        self.block_type.id()
    }

    /// Assignments in schema order.
    pub fn values(&self) -> impl Iterator<Item = (&Arc<Property>, &PropertyValue)> {
        self.values.iter().map(|(p, v)| (p, v))
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values
            .iter()
            .find(|(p, _)| p.name() == name)
            .map(|(_, v)| v)
    }

    pub fn value(&self, property: &Property) -> Option<&PropertyValue> {
        self.values
            .iter()
            .find(|(p, _)| **p == *property)
            .map(|(_, v)| v)
    }

    /// A copy with the named property set to `value`.
    pub fn with(&self, name: &str, value: PropertyValue) -> Result<BlockState> {
        let Some(slot) = self.values.iter().position(|(p, _)| p.name() == name) else {
            return Err(EditError::UnknownProperty {
                block: self.id().to_string(),
                property: name.to_string(),
            });
        };
        let property = &self.values[slot].0;
        if !property.accepts(&value) {
            return Err(EditError::InvalidPropertyValue {
                property: name.to_string(),
                value: value.to_string(),
            });
        }
        let mut next = self.clone();
        next.values[slot].1 = value;
        Ok(next)
    }

    /// Same type and values, ignoring which `Arc` holds the type.
    pub fn equals_fuzzy(&self, other: &BlockState) -> bool {
        self.id() == other.id() && self.values == other.values
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id().as_str())?;
        if self.values.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (property, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", property.name(), value)?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockState({self})")
    }
}

/// Collects one value per property of a type, in any order.
pub struct BlockStateBuilder {
    block_type: Arc<BlockType>,
    values: Vec<Option<PropertyValue>>,
}

impl BlockStateBuilder {
    pub fn new(block_type: Arc<BlockType>) -> Self {
        let values = vec![None; block_type.properties().len()];
        Self { block_type, values }
    }

    /// Assign `property`, which must be part of the type's schema (matched
    /// by identity).
    pub fn set(mut self, property: &Property, value: PropertyValue) -> Result<Self> {
        let Some(slot) = self.block_type.position(property) else {
            return Err(EditError::UnknownProperty {
                block: self.block_type.id().to_string(),
                property: property.name().to_string(),
            });
        };
        if !property.accepts(&value) {
            return Err(EditError::InvalidPropertyValue {
                property: property.name().to_string(),
                value: value.to_string(),
            });
        }
        self.values[slot] = Some(value);
        Ok(self)
    }

    /// Assign by property name.
    pub fn set_named(self, name: &str, value: PropertyValue) -> Result<Self> {
        let Some(property) = self.block_type.property(name).cloned() else {
            return Err(EditError::UnknownProperty {
                block: self.block_type.id().to_string(),
                property: name.to_string(),
            });
        };
        self.set(&property, value)
    }

    pub fn build(self) -> Result<BlockState> {
        let schema = self.block_type.properties();
        let mut values = Vec::with_capacity(schema.len());
        for (property, value) in schema.iter().zip(self.values) {
            let Some(value) = value else {
                return Err(EditError::MissingProperty {
                    block: self.block_type.id().to_string(),
                    property: property.name().to_string(),
                });
            };
            values.push((Arc::clone(property), value));
        }
        Ok(BlockState {
            block_type: self.block_type,
            values,
        })
    }
}

/// What the editor needs to know about a block's physical behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockMaterial {
    pub air: bool,
    pub solid: bool,
    pub burnable: bool,
    pub light_value: u8,
    pub container: bool,
}

impl BlockMaterial {
    pub fn is_air(&self) -> bool {
        self.air
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn is_burnable(&self) -> bool {
        self.burnable
    }

    pub fn light_value(&self) -> u8 {
        self.light_value
    }

    /// Whether the block holds an inventory.
    pub fn has_container(&self) -> bool {
        self.container
    }
}

/// The shared `minecraft:air` type, used by neutral worlds.
pub fn air() -> &'static Arc<BlockType> {
    static AIR: OnceLock<Arc<BlockType>> = OnceLock::new();
    AIR.get_or_init(|| {
        let id = Identifier::minecraft("air").expect("`minecraft:air` is well formed");
        Arc::new(BlockType::with_properties(id, Vec::new()))
    })
}

/// The only state of [`air`].
pub fn air_state() -> BlockState {
    BlockState {
        block_type: Arc::clone(air()),
        values: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stairs() -> (Arc<BlockType>, Arc<Property>, Arc<Property>) {
        let facing = Property::enumerated("facing", ["north", "south"]);
        let wet = Property::boolean("waterlogged");
        let id = Identifier::parse("minecraft:oak_stairs").unwrap();
        let block = Arc::new(BlockType::with_properties(
            id,
            vec![Arc::clone(&facing), Arc::clone(&wet)],
        ));
        (block, facing, wet)
    }

    #[test]
    fn builder_requires_every_property() {
        let (block, facing, _) = stairs();
        let err = BlockState::builder(Arc::clone(&block))
            .set(&facing, PropertyValue::Enum("north".into()))
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, EditError::MissingProperty { .. }));
    }

    #[test]
    fn builder_rejects_foreign_property() {
        let (block, _, _) = stairs();
        let lookalike = Property::boolean("waterlogged");
        let err = BlockState::builder(block)
            .set(&lookalike, PropertyValue::Bool(true))
            .err()
            .unwrap();
        assert!(matches!(err, EditError::UnknownProperty { .. }));
    }

    #[test]
    fn with_and_display() {
        let (block, facing, wet) = stairs();
        let state = BlockState::builder(block)
            .set(&wet, PropertyValue::Bool(false))
            .and_then(|b| b.set(&facing, PropertyValue::Enum("north".into())))
            .and_then(BlockStateBuilder::build)
            .unwrap();
        assert_eq!(state.to_string(), "minecraft:oak_stairs[facing=north,waterlogged=false]");

        let turned = state.with("facing", PropertyValue::Enum("south".into())).unwrap();
        assert_eq!(turned.get("facing"), Some(&PropertyValue::Enum("south".into())));
        assert_eq!(state.get("facing"), Some(&PropertyValue::Enum("north".into())));
        assert!(state.with("facing", PropertyValue::Int(3)).is_err());
        assert!(state.with("shape", PropertyValue::Int(3)).is_err());
    }

    #[test]
    fn schema_is_attached_once() {
        let id = Identifier::parse("test:lazy").unwrap();
        let block = BlockType::new(id);
        assert!(!block.has_schema());
        let first = Property::boolean("a");
        block.init_properties(vec![Arc::clone(&first)]);
        let kept = block.init_properties(vec![Property::boolean("b")]);
        assert_eq!(kept.len(), 1);
        assert_eq!(*kept[0], *first);
    }
}
