// ---------------------------------------------------------------------------
// SaveError: error types for save/load operations
// ---------------------------------------------------------------------------

use std::fmt;

use town::catalog::CatalogError;
use town::placement::PlacementError;

/// Errors that can occur while decoding or restoring a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// A line does not follow the save format. Lines are numbered from 1.
    Parse { line: usize, message: String },
    /// Save file version is newer than this build supports.
    VersionMismatch { expected_max: u32, found: u32 },
    /// A saved name or appearance does not match the loaded catalogs.
    Catalog { line: usize, source: CatalogError },
    /// A saved building or road collides with one restored before it, or
    /// lies too far outside the world.
    Overlap { line: usize, source: PlacementError },
    /// A load was requested without any save text.
    NoData,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Parse { line, message } => write!(f, "Line {line}: {message}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: save is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::Catalog { line, source } => write!(f, "Line {line}: {source}"),
            SaveError::Overlap { line, source } => write!(f, "Line {line}: {source}"),
            SaveError::NoData => write!(f, "No save data available to load"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Catalog { source, .. } => Some(source),
            SaveError::Overlap { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_error_display_parse() {
        let err = SaveError::Parse {
            line: 4,
            message: "expected an angle index".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Line 4"), "got: {msg}");
        assert!(msg.contains("angle index"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_version_mismatch() {
        let err = SaveError::VersionMismatch {
            expected_max: 1,
            found: 99,
        };
        let msg = format!("{err}");
        assert!(msg.contains("v99"), "got: {msg}");
        assert!(msg.contains("v1"), "got: {msg}");
    }

    #[test]
    fn test_save_error_catalog_has_source() {
        let err = SaveError::Catalog {
            line: 5,
            source: CatalogError::NotFound {
                kind: "building type",
                name: "castle".to_string(),
            },
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(format!("{err}").contains("castle"));
    }

    #[test]
    fn test_save_error_display_no_data() {
        let msg = format!("{}", SaveError::NoData);
        assert!(msg.contains("No save data"), "got: {msg}");
    }
}
