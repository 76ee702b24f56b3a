use crate::error::{KnowledgeError, Result};
use std::collections::HashSet;
use uuid::Uuid;

/// One ingestion event's entry in the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Generated unique identifier, replicated into every chunk of the source
    pub id: String,

    /// Display name (file name, URL, "Raw Text Input", ...)
    pub name: String,

    /// Whether queries may draw on this source
    pub enabled: bool,
}

/// Session-scoped registry of ingested sources.
///
/// The registry is the single place that knows which sources exist and which
/// are enabled; the enabled set is passed explicitly into every query rather
/// than consulted ambiently. Registration order is preserved.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    entries: Vec<SourceEntry>,
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new source under a fresh unique id, enabled by default.
    /// Returns the generated id.
    pub fn add(&mut self, name: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.entries.push(SourceEntry {
            id: id.clone(),
            name: name.into(),
            enabled: true,
        });
        id
    }

    /// Enable or disable a source
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| KnowledgeError::UnknownSource(id.to_string()))?;
        entry.enabled = enabled;
        Ok(())
    }

    /// Ids of all currently enabled sources
    #[must_use]
    pub fn enabled_ids(&self) -> HashSet<String> {
        self.entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.id.clone())
            .collect()
    }

    /// Iterate over entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter()
    }

    /// Number of registered sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no sources are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_generates_unique_enabled_sources() {
        let mut registry = SourceRegistry::new();
        let a = registry.add("notes.txt");
        let b = registry.add("notes.txt");

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.enabled_ids().len(), 2);
    }

    #[test]
    fn test_set_enabled_toggles_membership() {
        let mut registry = SourceRegistry::new();
        let a = registry.add("a");
        let b = registry.add("b");

        registry.set_enabled(&a, false).unwrap();
        let enabled = registry.enabled_ids();
        assert!(!enabled.contains(&a));
        assert!(enabled.contains(&b));

        registry.set_enabled(&a, true).unwrap();
        assert!(registry.enabled_ids().contains(&a));
    }

    #[test]
    fn test_set_enabled_unknown_source() {
        let mut registry = SourceRegistry::new();
        assert!(matches!(
            registry.set_enabled("missing", true),
            Err(KnowledgeError::UnknownSource(_))
        ));
    }

    #[test]
    fn test_iteration_preserves_registration_order() {
        let mut registry = SourceRegistry::new();
        registry.add("first");
        registry.add("second");

        let names: Vec<&str> = registry.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
