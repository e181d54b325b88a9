//! Block properties: named, typed axes of block-state variation.
//!
//! A [`Property`] is compared by identity. Two properties built from the
//! same name and values are different properties, so a block type's schema
//! can always tell them apart.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_PROPERTY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Enum(Vec<String>),
    /// Inclusive range.
    Integer { min: i32, max: i32 },
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Enum(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Enum(v) => f.write_str(v),
        }
    }
}

pub struct Property {
    id: PropertyId,
    name: String,
    kind: PropertyKind,
}

impl Property {
    fn new(name: &str, kind: PropertyKind) -> Arc<Self> {
        Arc::new(Self {
            id: PropertyId(NEXT_PROPERTY_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.to_string(),
            kind,
        })
    }

    pub fn enumerated<I, S>(name: &str, values: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, PropertyKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    pub fn integer(name: &str, min: i32, max: i32) -> Arc<Self> {
        Self::new(name, PropertyKind::Integer { min, max })
    }

    pub fn boolean(name: &str) -> Arc<Self> {
        Self::new(name, PropertyKind::Boolean)
    }

    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn accepts(&self, value: &PropertyValue) -> bool {
        match (&self.kind, value) {
            (PropertyKind::Enum(values), PropertyValue::Enum(v)) => values.iter().any(|x| x == v),
            (PropertyKind::Integer { min, max }, PropertyValue::Int(v)) => (*min..=*max).contains(v),
            (PropertyKind::Boolean, PropertyValue::Bool(_)) => true,
            _ => false,
        }
    }

    /// Parse user text. Enum names match ignoring ASCII case and come back
    /// in their declared spelling.
    pub fn parse_value(&self, text: &str) -> Option<PropertyValue> {
        match &self.kind {
            PropertyKind::Enum(values) => values
                .iter()
                .find(|v| v.eq_ignore_ascii_case(text))
                .map(|v| PropertyValue::Enum(v.clone())),
            PropertyKind::Integer { min, max } => text
                .parse::<i32>()
                .ok()
                .filter(|v| (*min..=*max).contains(v))
                .map(PropertyValue::Int),
            PropertyKind::Boolean => text.parse::<bool>().ok().map(PropertyValue::Bool),
        }
    }

    /// Every accepted value in declaration order.
    pub fn values(&self) -> Vec<PropertyValue> {
        match &self.kind {
            PropertyKind::Enum(values) => values.iter().cloned().map(PropertyValue::Enum).collect(),
            PropertyKind::Integer { min, max } => (*min..=*max).map(PropertyValue::Int).collect(),
            PropertyKind::Boolean => vec![PropertyValue::Bool(false), PropertyValue::Bool(true)],
        }
    }

    /// Structural equality: same name and same domain. Identity is ignored.
    pub fn same_shape(&self, other: &Property) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id.0)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookalikes_are_distinct() {
        let a = Property::enumerated("facing", ["north", "south"]);
        let b = Property::enumerated("facing", ["north", "south"]);
        assert!(a.same_shape(&b));
        assert_ne!(*a, *b);
    }

    #[test]
    fn parse_and_accept() {
        let facing = Property::enumerated("facing", ["north", "south"]);
        assert_eq!(facing.parse_value("NORTH"), Some(PropertyValue::Enum("north".into())));
        assert!(!facing.accepts(&PropertyValue::Enum("NORTH".into())));

        let power = Property::integer("power", 0, 15);
        assert!(power.accepts(&PropertyValue::Int(15)));
        assert!(!power.accepts(&PropertyValue::Int(16)));
        assert_eq!(power.values().len(), 16);
        assert_eq!(power.parse_value("16"), None);

        let lit = Property::boolean("lit");
        assert!(!lit.accepts(&PropertyValue::Int(1)));
        assert_eq!(lit.parse_value("true"), Some(PropertyValue::Bool(true)));
    }
}
