use std::fmt;

/// Errors raised while building or querying the catalogs.
///
/// Everything except [`CatalogError::NotFound`] and
/// [`CatalogError::AppearanceMismatch`] indicates a broken catalog document and
/// is fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog document is not valid JSON for [`super::CatalogConfig`].
    Parse(String),
    NotFound {
        kind: &'static str,
        name: String,
    },
    UnknownVariant {
        block: String,
        variant: String,
    },
    UnknownGroup {
        building_type: String,
        group: String,
    },
    /// A footprint token does not follow `block`, `block:a;b` or `block!a;b`.
    InvalidToken {
        building_type: String,
        token: String,
    },
    /// Names end up as whitespace-separated save tokens, so they must be
    /// non-empty and free of whitespace and token punctuation.
    InvalidName {
        kind: &'static str,
        name: String,
    },
    /// A footprint token leaves no permissible variant to choose from.
    EmptyVariantSet {
        building_type: String,
        token: String,
    },
    EmptyShape {
        building_type: String,
        shape: String,
    },
    TooManyLayers {
        building_type: String,
        layers: usize,
    },
    NoShapes {
        building_type: String,
    },
    /// A persisted appearance does not have one token per occupied cell.
    AppearanceMismatch {
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            CatalogError::NotFound { kind, name } => write!(f, "unknown {kind} '{name}'"),
            CatalogError::UnknownVariant { block, variant } => {
                write!(f, "block '{block}' has no variant '{variant}'")
            }
            CatalogError::UnknownGroup {
                building_type,
                group,
            } => write!(
                f,
                "building type '{building_type}' refers to unknown group '{group}'"
            ),
            CatalogError::InvalidToken {
                building_type,
                token,
            } => write!(
                f,
                "building type '{building_type}' has malformed footprint token '{token}'"
            ),
            CatalogError::InvalidName { kind, name } => {
                write!(f, "invalid {kind} name '{name}'")
            }
            CatalogError::EmptyVariantSet {
                building_type,
                token,
            } => write!(
                f,
                "footprint token '{token}' of building type '{building_type}' allows no variant"
            ),
            CatalogError::EmptyShape {
                building_type,
                shape,
            } => write!(
                f,
                "shape '{shape}' of building type '{building_type}' has no blocks"
            ),
            CatalogError::TooManyLayers {
                building_type,
                layers,
            } => write!(
                f,
                "building type '{building_type}' is {layers} layers tall, more than the grid holds"
            ),
            CatalogError::NoShapes { building_type } => {
                write!(f, "building type '{building_type}' defines no shapes")
            }
            CatalogError::AppearanceMismatch { expected, found } => write!(
                f,
                "appearance has {found} tokens but the shape has {expected} blocks"
            ),
        }
    }
}

impl std::error::Error for CatalogError {}
