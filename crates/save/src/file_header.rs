// ---------------------------------------------------------------------------
// file_header – first line of a save: the format version
// ---------------------------------------------------------------------------
//
// The header is a single decimal integer. Files written by a newer build are
// refused; there are no older formats to migrate from yet.

use crate::save_error::SaveError;

/// Current save format version.
pub const SAVE_FORMAT_VERSION: u32 = 1;

pub fn header_line() -> String {
    SAVE_FORMAT_VERSION.to_string()
}

/// Parses the header line and returns the version it declares.
///
/// # Errors
///
/// - `Parse` if the line is missing or not an integer
/// - `VersionMismatch` if the save comes from a newer build
pub fn parse_header(line: Option<&str>) -> Result<u32, SaveError> {
    let line = line.ok_or(SaveError::Parse {
        line: 1,
        message: "missing version header".to_string(),
    })?;
    let found: u32 = line.trim().parse().map_err(|_| SaveError::Parse {
        line: 1,
        message: format!("expected a version number, found '{}'", line.trim()),
    })?;
    if found > SAVE_FORMAT_VERSION || found == 0 {
        return Err(SaveError::VersionMismatch {
            expected_max: SAVE_FORMAT_VERSION,
            found,
        });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        assert_eq!(parse_header(Some(&header_line())), Ok(SAVE_FORMAT_VERSION));
    }

    #[test]
    fn test_header_tolerates_surrounding_whitespace() {
        assert_eq!(parse_header(Some("  1 \r")), Ok(1));
    }

    #[test]
    fn test_newer_version_is_refused() {
        assert_eq!(
            parse_header(Some("7")),
            Err(SaveError::VersionMismatch {
                expected_max: SAVE_FORMAT_VERSION,
                found: 7
            })
        );
    }

    #[test]
    fn test_missing_or_garbled_header() {
        assert!(matches!(
            parse_header(None),
            Err(SaveError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_header(Some("MEGA")),
            Err(SaveError::Parse { line: 1, .. })
        ));
    }
}
