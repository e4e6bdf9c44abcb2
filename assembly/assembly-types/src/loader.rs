//! Author-time asset loading.
//!
//! Catalogs and sequences are static, author-time data loaded once per
//! session from JSON files. The catalog file is an object with a `parts`
//! array; a sequence file is a single sequence object:
//!
//! ```json
//! {
//!   "parts": [
//!     {
//!       "id": "hub",
//!       "name": "Wheel Hub",
//!       "ghost_visual": "hub_ghost",
//!       "connection_points": [
//!         { "id": "axle", "local_position": [0.0, 0.0, 0.1] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! ```json
//! {
//!   "name": "wheel_mount",
//!   "steps": [
//!     {
//!       "name": "Mount wheel",
//!       "part": "hub",
//!       "operations": [
//!         { "type": "tighten", "torque_nm": 25.0, "tool": "torque_wrench" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::catalog::PartCatalog;
use crate::error::{DataError, DataResult};
use crate::part::PartDefinition;
use crate::sequence::AssemblySequence;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    parts: Vec<PartDefinition>,
}

/// Parse a part catalog from a JSON string.
///
/// # Errors
///
/// Returns [`DataError::Parse`] on malformed JSON and
/// [`DataError::DuplicatePart`] if two definitions share an id.
pub fn parse_catalog(json: &str) -> DataResult<PartCatalog> {
    let file: CatalogFile =
        serde_json::from_str(json).map_err(|source| DataError::Parse { source })?;

    let mut catalog = PartCatalog::new();
    for part in file.parts {
        catalog.insert(part)?;
    }
    Ok(catalog)
}

/// Parse an assembly sequence from a JSON string.
///
/// # Errors
///
/// Returns [`DataError::Parse`] on malformed JSON.
pub fn parse_sequence(json: &str) -> DataResult<AssemblySequence> {
    let sequence: AssemblySequence =
        serde_json::from_str(json).map_err(|source| DataError::Parse { source })?;

    if sequence.is_empty() {
        tracing::warn!(name = sequence.name(), "sequence has no steps");
    }
    Ok(sequence)
}

/// Load a part catalog from a JSON file.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be read,
/// [`DataError::Json`] on malformed JSON, and
/// [`DataError::DuplicatePart`] if two definitions share an id.
pub fn load_catalog(path: &Path) -> DataResult<PartCatalog> {
    let json = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&json).map_err(|err| match err {
        DataError::Parse { source } => DataError::Json {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    tracing::info!(path = %path.display(), parts = catalog.len(), "loaded part catalog");
    Ok(catalog)
}

/// Load an assembly sequence from a JSON file.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be read and
/// [`DataError::Json`] on malformed JSON.
pub fn load_sequence(path: &Path) -> DataResult<AssemblySequence> {
    let json = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let sequence = parse_sequence(&json).map_err(|err| match err {
        DataError::Parse { source } => DataError::Json {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    tracing::info!(
        path = %path.display(),
        name = sequence.name(),
        steps = sequence.step_count(),
        "loaded assembly sequence"
    );
    Ok(sequence)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operation::OperationKind;

    const CATALOG_JSON: &str = r#"{
        "parts": [
            {
                "id": "hub",
                "name": "Wheel Hub",
                "ghost_visual": "hub_ghost",
                "connection_points": [
                    { "id": "axle", "local_position": [0.0, 0.0, 0.1] }
                ]
            },
            { "id": "wheel", "name": "Front Wheel", "weight": 2.5 }
        ]
    }"#;

    const SEQUENCE_JSON: &str = r#"{
        "name": "wheel_mount",
        "description": "Front wheel mounting procedure",
        "steps": [
            {
                "name": "Mount wheel",
                "part": "hub",
                "ghost_offset": [0.0, 0.05, 0.0],
                "operations": [
                    { "type": "snap", "connection_point": 0, "snap_threshold": 0.05 },
                    { "type": "tighten", "torque_nm": 25.0, "tool": "torque_wrench" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(CATALOG_JSON).unwrap();

        assert_eq!(catalog.len(), 2);
        let hub = catalog.get(&"hub".into()).unwrap();
        assert_eq!(hub.ghost_visual(), Some("hub_ghost"));
        assert_eq!(hub.connection_points().len(), 1);
    }

    #[test]
    fn test_parse_catalog_duplicate_id() {
        let json = r#"{"parts": [
            { "id": "a", "name": "A" },
            { "id": "a", "name": "A again" }
        ]}"#;

        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, DataError::DuplicatePart { id } if id.as_str() == "a"));
    }

    #[test]
    fn test_parse_sequence() {
        let seq = parse_sequence(SEQUENCE_JSON).unwrap();

        assert_eq!(seq.name(), "wheel_mount");
        assert_eq!(seq.step_count(), 1);

        let step = seq.step(0).unwrap();
        assert_eq!(step.operations().len(), 2);
        assert!(matches!(
            step.operations()[1].kind(),
            OperationKind::Tighten { .. }
        ));
        assert!(!step.operations()[0].is_completed());
    }

    #[test]
    fn test_parse_sequence_malformed() {
        let err = parse_sequence("{ not json").unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
