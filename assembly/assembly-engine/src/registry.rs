//! Table registry: live lookup of pickable part instances by part id.

use hashbrown::HashMap;

use assembly_types::PartId;

use crate::table::{DetailLevel, TablePart};

/// Session-wide mapping from part id to at most one live table instance.
///
/// The registry is an explicitly owned object injected into engine calls;
/// no global state. Registration and removal are driven by whatever spawns
/// table instances; the engine only reads lookups and toggles instance
/// state.
///
/// Duplicate registration is first-wins: re-registering an id is ignored.
///
/// # Example
///
/// ```
/// use assembly_engine::{TablePart, TableRegistry};
/// use assembly_types::PartDefinition;
///
/// let mut registry = TableRegistry::new();
/// assert!(registry.register(TablePart::new(PartDefinition::new("hub", "Hub"))));
///
/// // Second registration of the same id is a no-op
/// assert!(!registry.register(TablePart::new(PartDefinition::new("hub", "Hub"))));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    parts: HashMap<PartId, TablePart>,
}

impl TableRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table instance under its part id.
    ///
    /// First registration wins: if the id is already registered the
    /// instance is dropped and `false` is returned.
    pub fn register(&mut self, part: TablePart) -> bool {
        let id = part.part_id().clone();
        if self.parts.contains_key(&id) {
            tracing::warn!(part = %id, "duplicate table registration ignored");
            return false;
        }
        self.parts.insert(id, part);
        true
    }

    /// Remove and return the instance registered under `id`.
    pub fn unregister(&mut self, id: &PartId) -> Option<TablePart> {
        self.parts.remove(id)
    }

    /// Look up an instance by part id.
    #[must_use]
    pub fn lookup(&self, id: &PartId) -> Option<&TablePart> {
        self.parts.get(id)
    }

    /// Look up a mutable instance by part id.
    pub fn lookup_mut(&mut self, id: &PartId) -> Option<&mut TablePart> {
        self.parts.get_mut(id)
    }

    /// Check whether an instance is registered for `id`.
    #[must_use]
    pub fn contains(&self, id: &PartId) -> bool {
        self.parts.contains_key(id)
    }

    /// Toggle the detail level of a registered instance.
    ///
    /// Pure visual side effect; returns `false` only if the id is not
    /// registered.
    pub fn switch_detail(&mut self, id: &PartId, detail: DetailLevel) -> bool {
        match self.parts.get_mut(id) {
            Some(part) => {
                part.set_detail(detail);
                tracing::debug!(part = %id, detail = detail.as_str(), "detail switched");
                true
            }
            None => false,
        }
    }

    /// Get the number of registered instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over registered instances.
    pub fn parts(&self) -> impl Iterator<Item = &TablePart> {
        self.parts.values()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use assembly_types::PartDefinition;

    fn table_part(id: &str) -> TablePart {
        TablePart::new(PartDefinition::new(id, id.to_uppercase()))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = TableRegistry::new();
        assert!(registry.register(table_part("hub")));

        let id = PartId::new("hub");
        assert!(registry.contains(&id));
        assert_eq!(registry.lookup(&id).unwrap().part_id(), &id);
        assert!(registry.lookup(&PartId::new("other")).is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = TableRegistry::new();

        let first = table_part("hub").with_pose(assembly_types::Pose::identity());
        assert!(registry.register(first));

        let mut second = table_part("hub");
        second.mark_placed();
        assert!(!registry.register(second));

        // The stored instance is still the first one
        let id = PartId::new("hub");
        assert!(!registry.lookup(&id).unwrap().is_placed());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister() {
        let mut registry = TableRegistry::new();
        registry.register(table_part("hub"));

        let id = PartId::new("hub");
        let removed = registry.unregister(&id);
        assert!(removed.is_some());
        assert!(!registry.contains(&id));
        assert!(registry.unregister(&id).is_none());
    }

    #[test]
    fn test_switch_detail() {
        let mut registry = TableRegistry::new();
        registry.register(table_part("hub"));

        let id = PartId::new("hub");
        assert!(registry.switch_detail(&id, DetailLevel::High));
        assert_eq!(registry.lookup(&id).unwrap().detail(), DetailLevel::High);

        assert!(!registry.switch_detail(&PartId::new("missing"), DetailLevel::High));
    }
}
