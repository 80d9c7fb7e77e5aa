//! Translation of database driver failures into faults.
//!
//! Drivers disagree on error types, so the input here is a driver-agnostic
//! view of what they all report: the SQLSTATE plus the optional server-side
//! diagnostics. A driver integration fills in a [`DriverError`] and calls
//! [`translate`]; everything downstream consumes the resulting [`Fault`]
//! through the ordinary public contract.

use crate::category::Category;
use crate::fault::Fault;
use crate::options::{Map, Opt, with_category, with_code};

/// SQLSTATE class for a unique-constraint violation.
const UNIQUE_VIOLATION_SQLSTATE: &str = "23505";

/// Code assigned to unique-constraint conflicts.
pub const CODE_UNIQUE_VIOLATION: &str = "UNIQUE_VIOLATION";

/// Driver-agnostic view of a database error.
#[derive(Debug, Clone, Default)]
pub struct DriverError {
    /// Five-character SQLSTATE reported by the server.
    pub sqlstate: String,
    /// Primary error message.
    pub message: String,
    /// Optional secondary detail line.
    pub detail: Option<String>,
    /// Optional hint line.
    pub hint: Option<String>,
    /// Violated constraint, when the server names one.
    pub constraint: Option<String>,
    /// Offending column, when the server names one.
    pub column: Option<String>,
    /// Table involved, when the server names one.
    pub table: Option<String>,
}

/// Builds a fault from a database failure: category [`Category::Conflict`]
/// with code [`CODE_UNIQUE_VIOLATION`] for a uniqueness violation,
/// [`Category::Internal`] otherwise. The server diagnostics land in the
/// fault's details. One caller frame is captured, then `opts` apply.
#[track_caller]
pub fn translate(err: DriverError, opts: impl IntoIterator<Item = Opt>) -> Fault {
    let mut details = Map::new();
    details.insert("sqlstate".to_string(), err.sqlstate.clone());
    for (key, value) in [
        ("detail", err.detail),
        ("hint", err.hint),
        ("constraint", err.constraint),
        ("column", err.column),
        ("table", err.table),
    ] {
        if let Some(value) = value {
            details.insert(key.to_string(), value);
        }
    }

    let mut base: Vec<Opt> = Vec::new();
    if err.sqlstate == UNIQUE_VIOLATION_SQLSTATE {
        base.push(with_category(Category::Conflict));
        base.push(with_code(CODE_UNIQUE_VIOLATION));
    }
    base.push(Opt::Details(details));
    base.extend(opts);
    crate::new(err.message, base)
}
