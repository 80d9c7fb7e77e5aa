//! Read-only logging sink for faults.

use crate::fault::Fault;

/// Emits one structured `error` event for `fault` carrying its code,
/// category, trace and details. Reads only; the fault is never modified.
pub fn report(fault: &Fault) {
    tracing::error!(
        code = fault.code(),
        category = %fault.category(),
        trace = fault.trace(),
        details = ?fault.details(),
        "{}",
        fault.message(),
    );
}
