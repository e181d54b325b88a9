//! Error type for bridge operations.

use cinder_edit::EditError;
use cinder_edit::identifier::{Identifier, IdentifierError};
use cinder_engine::palette::PaletteError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The item has no block form. Callers asking "what block is this?"
    /// should expect it.
    #[error("`{0}` is not a block")]
    NotABlock(String),

    #[error("world `{0}` is no longer loaded")]
    WorldUnloaded(String),

    #[error("entity has despawned")]
    EntityDespawned,

    #[error("entity is not a player")]
    NotAPlayer,

    /// The host declared a trait whose value type the bridge cannot map.
    #[error("trait `{name}` has unsupported kind `{kind}`")]
    UnsupportedTraitKind { name: String, kind: String },

    /// A property this bridge never produced was handed back to it.
    #[error("property `{0}` has no host trait")]
    UnknownProperty(String),

    #[error("host has no counterpart for `{0}`")]
    MissingAdapter(Identifier),

    #[error("no host block state with runtime id {0}")]
    UnknownHostState(u16),

    #[error("no host block kind with index {0}")]
    UnknownHostKind(usize),

    #[error("no loaded world matches `{0}`")]
    NoSuchWorld(String),

    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

impl From<BridgeError> for EditError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::NotABlock(id) => EditError::NotABlock(id),
            BridgeError::WorldUnloaded(name) => EditError::WorldUnloaded(name),
            BridgeError::EntityDespawned => EditError::EntityDespawned,
            BridgeError::Identifier(e) => EditError::Identifier(e),
            BridgeError::Edit(e) => e,
            other => EditError::Platform(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_onto_edit_errors() {
        let edit = EditError::from(BridgeError::EntityDespawned);
        assert!(matches!(edit, EditError::EntityDespawned));

        let edit = EditError::from(BridgeError::NotABlock("minecraft:stick".into()));
        assert!(matches!(edit, EditError::NotABlock(id) if id == "minecraft:stick"));

        let edit = EditError::from(BridgeError::UnknownHostState(9));
        assert!(matches!(edit, EditError::Platform(_)));
        assert_eq!(edit.to_string(), "platform error: no host block state with runtime id 9");

        let edit = EditError::from(BridgeError::UnknownHostKind(70_000));
        assert_eq!(edit.to_string(), "platform error: no host block kind with index 70000");
    }
}
