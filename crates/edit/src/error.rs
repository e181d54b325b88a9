//! Errors surfaced by the editing model and by platform implementations.

use thiserror::Error;

use crate::identifier::IdentifierError;

pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The item has no block form. Expected for tools, food and the like.
    #[error("`{0}` is not a block")]
    NotABlock(String),

    #[error("world `{0}` is no longer loaded")]
    WorldUnloaded(String),

    #[error("entity has despawned")]
    EntityDespawned,

    #[error("{registry} `{id}` is already registered")]
    DuplicateEntry { registry: &'static str, id: String },

    #[error("`{value}` is not a valid value for property `{property}`")]
    InvalidPropertyValue { property: String, value: String },

    #[error("block `{block}` has no property `{property}`")]
    UnknownProperty { block: String, property: String },

    #[error("block `{block}` is missing a value for property `{property}`")]
    MissingProperty { block: String, property: String },

    /// Anything a platform cannot express in the variants above.
    #[error("platform error: {0}")]
    Platform(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let error = EditError::NotABlock("minecraft:stick".into());
        assert_eq!(error.to_string(), "`minecraft:stick` is not a block");
        let error = EditError::from(IdentifierError::Empty);
        assert_eq!(error.to_string(), "identifier is empty");
    }
}
