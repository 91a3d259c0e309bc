//! Entity identifiers.
//!
//! Every quiz entity carries an [`EntityId`] that is either a client-minted
//! temporary token or an identifier assigned by the persistence collaborator.
//! Temporariness is part of the type, the string prefix only exists on the wire.

use std::fmt;

use uuid::Uuid;

use crate::error::{ModelError, Result};

/// Wire prefix of client-minted identifiers.
pub const TEMPORARY_ID_PREFIX: &str = "front-uuid-";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityId {
    /// Minted in the editor, unknown to the backing store.
    Temporary(String),
    /// Assigned by the backing store.
    Persisted(String),
}

impl EntityId {
    /// Wrap a server-assigned identifier.
    pub fn persisted(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::BlankId);
        }
        if trimmed.starts_with(TEMPORARY_ID_PREFIX) {
            return Err(ModelError::ReservedPrefix(value));
        }
        Ok(Self::Persisted(trimmed.to_string()))
    }

    /// Classify a raw wire string.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().strip_prefix(TEMPORARY_ID_PREFIX) {
            Some(token) => Ok(Self::Temporary(token.to_string())),
            None => Self::persisted(value),
        }
    }

    #[inline]
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }

    /// The server id, if this entity has been persisted.
    pub fn as_persisted(&self) -> Option<&str> {
        match self {
            Self::Persisted(id) => Some(id),
            Self::Temporary(_) => None,
        }
    }

    /// Wire representation.
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temporary(token) => write!(f, "{TEMPORARY_ID_PREFIX}{token}"),
            Self::Persisted(id) => f.write_str(id),
        }
    }
}

impl serde::Serialize for EntityId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for EntityId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Mint a fresh temporary identifier.
///
/// Tokens are random UUIDv4 values drawn from the OS generator, so ids minted by
/// independent editor instances do not collide.
pub fn mint_temporary_id() -> EntityId {
    EntityId::Temporary(Uuid::new_v4().to_string())
}

/// Returns true if `id` was minted in the editor.
#[inline]
pub fn is_temporary(id: &EntityId) -> bool {
    id.is_temporary()
}

/// Returns true if a raw wire id carries the temporary prefix.
pub fn is_temporary_str(id: &str) -> bool {
    id.trim().starts_with(TEMPORARY_ID_PREFIX)
}

/// Serde helper: a missing, `null` or blank id decodes as a freshly minted temporary id.
pub(crate) fn deserialize_id_or_mint<'de, D>(deserializer: D) -> std::result::Result<EntityId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(deserialize_optional_id(deserializer)?.unwrap_or_else(mint_temporary_id))
}

/// Serde helper for back-references: `null` and blank strings decode as `None`.
pub(crate) fn deserialize_optional_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<EntityId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match value {
        Some(raw) if !raw.trim().is_empty() => EntityId::parse(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_temporary_and_distinct() {
        let a = mint_temporary_id();
        let b = mint_temporary_id();
        assert!(is_temporary(&a));
        assert_ne!(a, b);
        assert!(is_temporary_str(&a.to_wire()));
    }

    #[test]
    fn persisted_rejects_reserved_prefix() {
        assert_eq!(EntityId::persisted("  "), Err(ModelError::BlankId));
        assert!(matches!(
            EntityId::persisted("front-uuid-abc"),
            Err(ModelError::ReservedPrefix(_))
        ));
        let id = EntityId::persisted("q-17").unwrap();
        assert!(!id.is_temporary());
        assert_eq!(id.as_persisted(), Some("q-17"));
    }

    #[test]
    fn parse_round_trips_wire_form() {
        let temp = mint_temporary_id();
        assert_eq!(EntityId::parse(&temp.to_wire()).unwrap(), temp);
        assert_eq!(
            EntityId::parse("abc").unwrap(),
            EntityId::Persisted("abc".to_string())
        );
    }
}
