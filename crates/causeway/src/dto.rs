//! Serializable snapshot of a fault.

use crate::category::Category;
use crate::fault::Fault;
use crate::options::Map;
use serde::{Deserialize, Serialize};

/// Wire snapshot of a [`Fault`], without the opaque origin.
///
/// `category` carries the stable ordinal (see [`Category::ordinal`]); it is
/// the one place where silent drift between the two ends of a connection
/// breaks classification, so it is an integer, never a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultDto {
    /// Machine-readable code.
    pub code: String,
    /// Plain human-readable message (not the `Display` render, so a
    /// round-trip reproduces it byte for byte).
    pub message: String,
    /// Stable category ordinal.
    pub category: i32,
    /// Validation fields, omitted when empty.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map,
    /// Debugging details, omitted when empty.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map,
    /// Accumulated call-site trace, omitted when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trace: String,
}

impl From<&Fault> for FaultDto {
    fn from(fault: &Fault) -> Self {
        Self {
            code: fault.code().to_string(),
            message: fault.message().to_string(),
            category: fault.category().ordinal(),
            fields: fault.fields().clone(),
            details: fault.details().clone(),
            trace: fault.trace().to_string(),
        }
    }
}

impl FaultDto {
    /// Rebuilds a [`Fault`] field for field. The origin is a fresh synthetic
    /// reference; identity never crosses the wire. Out-of-range category
    /// ordinals survive as [`Category::Unrecognized`].
    pub fn into_fault(self) -> Fault {
        Fault::from_parts(
            self.code,
            self.message,
            Category::from_ordinal(self.category),
            self.fields,
            self.details,
            self.trace,
        )
    }
}
