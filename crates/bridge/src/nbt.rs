//! Tag payload conversion between the host's `fastnbt` values and the
//! editor's tag tree.

use cinder_edit::tag::{CompoundTag, Tag};
use cinder_engine::item::NbtCompound;
use fastnbt::{ByteArray, IntArray, LongArray, Value};

use crate::config::TagMode;

pub trait TagConverter: Send + Sync {
    fn to_canonical(&self, tag: &NbtCompound) -> CompoundTag;

    fn to_host(&self, tag: &CompoundTag) -> NbtCompound;
}

pub fn for_mode(mode: TagMode) -> Box<dyn TagConverter> {
    match mode {
        TagMode::Structural => Box::new(StructuralTags),
        TagMode::Discard => Box::new(DiscardTags),
    }
}

/// Lossless mirror of every tag kind. Host compounds are unordered, so keys
/// come out sorted.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralTags;

impl TagConverter for StructuralTags {
    fn to_canonical(&self, tag: &NbtCompound) -> CompoundTag {
        compound_to_canonical(tag)
    }

    fn to_host(&self, tag: &CompoundTag) -> NbtCompound {
        tag.iter()
            .map(|(key, value)| (key.to_string(), value_to_host(value)))
            .collect()
    }
}

/// Drops every payload. Both directions produce an empty compound.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardTags;

impl TagConverter for DiscardTags {
    fn to_canonical(&self, _tag: &NbtCompound) -> CompoundTag {
        CompoundTag::new()
    }

    fn to_host(&self, _tag: &CompoundTag) -> NbtCompound {
        NbtCompound::new()
    }
}

fn compound_to_canonical(tag: &NbtCompound) -> CompoundTag {
    let mut keys: Vec<&String> = tag.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| (key.clone(), value_to_canonical(&tag[key])))
        .collect()
}

fn value_to_canonical(value: &Value) -> Tag {
    match value {
        Value::Byte(v) => Tag::Byte(*v),
        Value::Short(v) => Tag::Short(*v),
        Value::Int(v) => Tag::Int(*v),
        Value::Long(v) => Tag::Long(*v),
        Value::Float(v) => Tag::Float(*v),
        Value::Double(v) => Tag::Double(*v),
        Value::String(v) => Tag::String(v.clone()),
        Value::ByteArray(v) => Tag::ByteArray(v.to_vec()),
        Value::IntArray(v) => Tag::IntArray(v.to_vec()),
        Value::LongArray(v) => Tag::LongArray(v.to_vec()),
        Value::List(values) => Tag::List(values.iter().map(value_to_canonical).collect()),
        Value::Compound(map) => Tag::Compound(compound_to_canonical(map)),
    }
}

fn value_to_host(tag: &Tag) -> Value {
    match tag {
        Tag::Byte(v) => Value::Byte(*v),
        Tag::Short(v) => Value::Short(*v),
        Tag::Int(v) => Value::Int(*v),
        Tag::Long(v) => Value::Long(*v),
        Tag::Float(v) => Value::Float(*v),
        Tag::Double(v) => Value::Double(*v),
        Tag::String(v) => Value::String(v.clone()),
        Tag::ByteArray(v) => Value::ByteArray(ByteArray::new(v.clone())),
        Tag::IntArray(v) => Value::IntArray(IntArray::new(v.clone())),
        Tag::LongArray(v) => Value::LongArray(LongArray::new(v.clone())),
        Tag::List(values) => Value::List(values.iter().map(value_to_host).collect()),
        Tag::Compound(compound) => Value::Compound(
            compound
                .iter()
                .map(|(key, value)| (key.to_string(), value_to_host(value)))
                .collect(),
        ),
    }
}
