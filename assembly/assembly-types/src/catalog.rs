//! Part catalog: the immutable id-keyed lookup of part definitions.

use hashbrown::HashMap;

use crate::error::{DataError, DataResult};
use crate::part::{PartDefinition, PartId};

/// Catalog of part definitions, keyed by part id.
///
/// Loaded once per session from author-time data; ids are unique and
/// definitions are not mutated after load.
///
/// # Example
///
/// ```
/// use assembly_types::{PartCatalog, PartDefinition};
///
/// let mut catalog = PartCatalog::new();
/// catalog.insert(PartDefinition::new("frame", "Frame")).unwrap();
///
/// assert!(catalog.contains(&"frame".into()));
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PartCatalog {
    parts: HashMap<PartId, PartDefinition>,
}

impl PartCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part definition.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::DuplicatePart`] if the id is already present.
    pub fn insert(&mut self, part: PartDefinition) -> DataResult<()> {
        if self.parts.contains_key(part.id()) {
            return Err(DataError::DuplicatePart {
                id: part.id().clone(),
            });
        }
        self.parts.insert(part.id().clone(), part);
        Ok(())
    }

    /// Get a part definition by id.
    #[must_use]
    pub fn get(&self, id: &PartId) -> Option<&PartDefinition> {
        self.parts.get(id)
    }

    /// Check whether a part id is in the catalog.
    #[must_use]
    pub fn contains(&self, id: &PartId) -> bool {
        self.parts.contains_key(id)
    }

    /// Get the number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over all part definitions.
    pub fn parts(&self) -> impl Iterator<Item = &PartDefinition> {
        self.parts.values()
    }

    /// Iterate over all part ids.
    pub fn part_ids(&self) -> impl Iterator<Item = &PartId> {
        self.parts.keys()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut catalog = PartCatalog::new();
        catalog
            .insert(PartDefinition::new("axle", "Axle"))
            .unwrap();

        let id = PartId::new("axle");
        assert!(catalog.contains(&id));
        assert_eq!(catalog.get(&id).unwrap().name(), "Axle");
        assert!(catalog.get(&PartId::new("missing")).is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = PartCatalog::new();
        catalog.insert(PartDefinition::new("axle", "Axle")).unwrap();

        let err = catalog
            .insert(PartDefinition::new("axle", "Other Axle"))
            .unwrap_err();
        assert!(matches!(err, DataError::DuplicatePart { id } if id.as_str() == "axle"));

        // First insertion is untouched
        assert_eq!(catalog.get(&"axle".into()).unwrap().name(), "Axle");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_iteration() {
        let mut catalog = PartCatalog::new();
        catalog.insert(PartDefinition::new("a", "A")).unwrap();
        catalog.insert(PartDefinition::new("b", "B")).unwrap();

        let mut ids: Vec<_> = catalog.part_ids().map(PartId::as_str).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(catalog.parts().count(), 2);
    }
}
