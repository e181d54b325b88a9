//! Host traits ↔ canonical properties.
//!
//! Both directions are keyed by the identity of the descriptor (its
//! `TraitId` / `PropertyId`), never by name or values: two lookalike traits
//! get two properties, and each property maps back to exactly the trait it
//! came from.

use std::sync::Arc;

use cinder_edit::property::{Property, PropertyId, PropertyKind, PropertyValue};
use cinder_engine::palette::{BlockTrait, TraitId, TraitKind, TraitValue};
use dashmap::DashMap;

use crate::error::{BridgeError, Result};

pub struct PropertyMapper {
    to_canonical: DashMap<TraitId, Arc<Property>>,
    to_host: DashMap<PropertyId, Arc<BlockTrait>>,
}

impl PropertyMapper {
    pub fn new() -> Self {
        Self {
            to_canonical: DashMap::new(),
            to_host: DashMap::new(),
        }
    }

    /// The property for `host_trait`, created and cached on first use.
    ///
    /// Fails for a trait kind the bridge does not understand, without
    /// caching anything.
    pub fn to_property(&self, host_trait: &Arc<BlockTrait>) -> Result<Arc<Property>> {
        if let Some(hit) = self.to_canonical.get(&host_trait.id()) {
            return Ok(Arc::clone(hit.value()));
        }
        let kind = classify(host_trait)?;

        // The reverse entry goes in before the forward entry is published,
        // so anyone holding the property can map it back.
        let entry = self.to_canonical.entry(host_trait.id()).or_insert_with(|| {
            let property = match kind {
                PropertyKind::Enum(values) => Property::enumerated(host_trait.name(), values),
                PropertyKind::Integer { min, max } => Property::integer(host_trait.name(), min, max),
                PropertyKind::Boolean => Property::boolean(host_trait.name()),
            };
            self.to_host.insert(property.id(), Arc::clone(host_trait));
            tracing::debug!("Mapped trait '{}' to a property", host_trait.name());
            property
        });
        Ok(Arc::clone(entry.value()))
    }

    /// The trait `property` was created from.
    pub fn to_trait(&self, property: &Property) -> Result<Arc<BlockTrait>> {
        self.to_host
            .get(&property.id())
            .map(|hit| Arc::clone(hit.value()))
            .ok_or_else(|| BridgeError::UnknownProperty(property.name().to_string()))
    }

    /// Number of traits mapped so far.
    pub fn len(&self) -> usize {
        self.to_canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_canonical.is_empty()
    }
}

impl Default for PropertyMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(host_trait: &BlockTrait) -> Result<PropertyKind> {
    match host_trait.kind() {
        TraitKind::Enum(values) => Ok(PropertyKind::Enum(
            values.iter().map(|v| v.to_ascii_lowercase()).collect(),
        )),
        TraitKind::Integer { min, max } => Ok(PropertyKind::Integer {
            min: *min,
            max: *max,
        }),
        TraitKind::Boolean => Ok(PropertyKind::Boolean),
        TraitKind::Custom { type_name, .. } => Err(BridgeError::UnsupportedTraitKind {
            name: host_trait.name().to_string(),
            kind: type_name.clone(),
        }),
    }
}

/// Host value → canonical value. Enum names are lower-cased.
pub fn to_property_value(host_trait: &BlockTrait, value: TraitValue<'_>) -> Result<PropertyValue> {
    match value {
        TraitValue::Enum(name) => Ok(PropertyValue::Enum(name.to_ascii_lowercase())),
        TraitValue::Integer(v) => Ok(PropertyValue::Int(v)),
        TraitValue::Boolean(v) => Ok(PropertyValue::Bool(v)),
        TraitValue::Custom(_) => Err(BridgeError::UnsupportedTraitKind {
            name: host_trait.name().to_string(),
            kind: "custom".to_string(),
        }),
    }
}

/// Canonical value → host value. The host matches enum names ignoring case.
pub fn to_trait_value(value: &PropertyValue) -> TraitValue<'_> {
    match value {
        PropertyValue::Enum(name) => TraitValue::Enum(name),
        PropertyValue::Int(v) => TraitValue::Integer(*v),
        PropertyValue::Bool(v) => TraitValue::Boolean(*v),
    }
}
