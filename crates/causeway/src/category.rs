//! Coarse error classification.

use std::fmt;

/// Broad family a [`Fault`](crate::Fault) belongs to.
///
/// The six named variants are the whole classification axis exposed to
/// callers; finer-grained disambiguation goes through the fault's `code`.
/// The category drives status mapping at service boundaries, so its wire
/// ordinals (0–5, declaration order) are frozen: both ends of a connection
/// must agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Unexpected issue inside the application. The default.
    #[default]
    Internal,
    /// User input did not meet expected criteria.
    Validation,
    /// A requested resource cannot be located.
    NotFound,
    /// A resource already exists.
    Conflict,
    /// The caller is not authenticated.
    Authentication,
    /// The caller is authenticated but not allowed.
    Forbidden,
    /// An ordinal received off the wire that maps to none of the six
    /// categories. Renders deterministically and maps to a generic
    /// boundary status instead of failing the conversion.
    Unrecognized(i32),
}

impl Category {
    /// Stable wire ordinal of this category.
    pub const fn ordinal(self) -> i32 {
        match self {
            Self::Internal => 0,
            Self::Validation => 1,
            Self::NotFound => 2,
            Self::Conflict => 3,
            Self::Authentication => 4,
            Self::Forbidden => 5,
            Self::Unrecognized(n) => n,
        }
    }

    /// Total inverse of [`Category::ordinal`]: out-of-range ordinals become
    /// [`Category::Unrecognized`] rather than an error.
    pub const fn from_ordinal(n: i32) -> Self {
        match n {
            0 => Self::Internal,
            1 => Self::Validation,
            2 => Self::NotFound,
            3 => Self::Conflict,
            4 => Self::Authentication,
            5 => Self::Forbidden,
            other => Self::Unrecognized(other),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => f.write_str("internal"),
            Self::Validation => f.write_str("validation"),
            Self::NotFound => f.write_str("not_found"),
            Self::Conflict => f.write_str("conflict"),
            Self::Authentication => f.write_str("authentication"),
            Self::Forbidden => f.write_str("forbidden"),
            Self::Unrecognized(n) => write!(f, "unknown category ({n})"),
        }
    }
}
