//! Enrolled credential registry
//!
//! Ordered collection of identifiers (national IDs or user codes) enrolled
//! for DayToken, each displayed with the masked tail of its active token.
//! Insertion order is preserved for rendering; there is no hidden state.

use serde::{Deserialize, Serialize};

use crate::error::{DayTokenError, Result};

/// Kind of an enrolled identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// Personal national ID (CPF)
    NationalId,

    /// Corporate user code
    UserCode,
}

impl core::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IdentifierKind::NationalId => write!(f, "national-id"),
            IdentifierKind::UserCode => write!(f, "user-code"),
        }
    }
}

/// One enrolled identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// The identifier itself, e.g. "012.345.678-90"
    pub identifier: String,

    /// Whether this is a personal or corporate enrollment
    pub kind: IdentifierKind,

    /// Trailing digits of the active token, e.g. "1234"
    pub token_suffix: String,

    /// Unix timestamp of enrollment
    pub enrolled_at: u64,
}

/// Ordered registry of enrolled identifiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialRegistry {
    entries: Vec<RegistryEntry>,
}

impl CredentialRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Enroll a new identifier.
    ///
    /// Fails with [`DayTokenError::AlreadyEnrolled`] if the same identifier
    /// and kind are already present.
    pub fn enroll(
        &mut self,
        identifier: impl Into<String>,
        kind: IdentifierKind,
        token_suffix: impl Into<String>,
        enrolled_at: u64,
    ) -> Result<()> {
        let identifier = identifier.into();
        if self.find(&identifier, kind).is_some() {
            return Err(DayTokenError::AlreadyEnrolled(identifier));
        }
        self.entries.push(RegistryEntry {
            identifier,
            kind,
            token_suffix: token_suffix.into(),
            enrolled_at,
        });
        Ok(())
    }

    /// Remove an enrollment by identifier and kind, returning the entry
    pub fn remove(&mut self, identifier: &str, kind: IdentifierKind) -> Result<RegistryEntry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.identifier == identifier && e.kind == kind)
            .ok_or_else(|| DayTokenError::NotEnrolled(identifier.to_string()))?;
        Ok(self.entries.remove(position))
    }

    /// Select an enrollment by identifier and kind
    pub fn select(&self, identifier: &str, kind: IdentifierKind) -> Result<&RegistryEntry> {
        self.find(identifier, kind)
            .ok_or_else(|| DayTokenError::NotEnrolled(identifier.to_string()))
    }

    /// All enrollments of the given kind, in insertion order
    pub fn of_kind(&self, kind: IdentifierKind) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// All enrollments in insertion order
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, identifier: &str, kind: IdentifierKind) -> Option<&RegistryEntry> {
        self.entries
            .iter()
            .find(|e| e.identifier == identifier && e.kind == kind)
    }
}
