//! Safe extraction of structured data from arbitrary errors.
//!
//! Layers that do not care about the structured shape propagate plain errors;
//! these helpers let downstream code inspect them without a failing downcast.

use crate::category::Category;
use crate::fault::{self, Fault};
use crate::{DEFAULT_CATEGORY, DEFAULT_CODE};

/// Returns the structured code, or [`DEFAULT_CODE`] for anything that is not
/// a [`Fault`]. An unstructured error at this point usually means a lower
/// layer never normalised it.
pub fn get_code<'a>(err: &'a (dyn std::error::Error + 'static)) -> &'a str {
    err.downcast_ref::<Fault>().map_or(DEFAULT_CODE, Fault::code)
}

/// Returns the structured category, or [`DEFAULT_CATEGORY`] for anything
/// that is not a [`Fault`].
pub fn get_category(err: &(dyn std::error::Error + 'static)) -> Category {
    err.downcast_ref::<Fault>()
        .map_or(DEFAULT_CATEGORY, Fault::category)
}

/// True iff [`get_code`] for `err` is a member of `codes`. A foreign error
/// therefore matches only the [`DEFAULT_CODE`] sentinel.
pub fn is_code_in(err: &(dyn std::error::Error + 'static), codes: &[&str]) -> bool {
    codes.contains(&get_code(err))
}

/// Returns `err` as a [`Fault`]: identity if it already is one (no extra
/// trace frame), otherwise a wrap (one frame).
#[track_caller]
pub fn as_fault<E>(err: E) -> Fault
where
    E: std::error::Error + Send + Sync + 'static,
{
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    match boxed.downcast::<Fault>() {
        Ok(own) => *own,
        Err(foreign) => fault::wrap_boxed(foreign, []),
    }
}

/// Wraps `err` (one trace frame) and overwrites its category to `category`
/// only when its current code is a member of `codes`; otherwise the category
/// stays untouched.
///
/// Useful for promoting a known subset of codes, e.g. turning the
/// internal-by-default errors of a lower layer into validation errors:
///
/// ```
/// use causeway::{new, with_code, wrap_with_category_on_codes, Category};
///
/// let fault = new("bad slug", [with_code("BAD_SLUG")]);
/// let fault = wrap_with_category_on_codes(fault, Category::Validation, &["BAD_SLUG"]);
/// assert_eq!(fault.category(), Category::Validation);
/// ```
#[track_caller]
pub fn wrap_with_category_on_codes<E>(err: E, category: Category, codes: &[&str]) -> Fault
where
    E: std::error::Error + Send + Sync + 'static,
{
    let mut fault = fault::wrap_boxed(Box::new(err), []);
    if codes.iter().any(|code| *code == fault.code()) {
        fault.category = category;
    }
    fault
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new, with_code};
    use std::io;

    #[test]
    fn get_code_from_fault() {
        let fault = new("boom", [with_code("CUSTOM")]);
        assert_eq!(get_code(&fault), "CUSTOM");
    }

    #[test]
    fn returned_code_borrows_from_the_error_not_the_reference() {
        let fault = new("boom", [with_code("LONG_LIVED")]);
        let code = {
            let as_dyn: &(dyn std::error::Error + 'static) = &fault;
            get_code(as_dyn)
        };
        assert_eq!(code, "LONG_LIVED");
    }

    #[test]
    fn get_code_from_foreign_error_is_default() {
        let err = io::Error::other("generic");
        assert_eq!(get_code(&err), DEFAULT_CODE);
    }

    #[test]
    fn get_category_from_fault() {
        let fault = new("boom", [crate::with_category(Category::NotFound)]);
        assert_eq!(get_category(&fault), Category::NotFound);
    }

    #[test]
    fn get_category_from_foreign_error_is_internal() {
        let err = io::Error::other("generic");
        assert_eq!(get_category(&err), Category::Internal);
    }

    #[test]
    fn is_code_in_membership() {
        let fault = new("boom", [with_code("CODE_1")]);
        assert!(is_code_in(&fault, &["CODE_0", "CODE_1", "CODE_2"]));
        assert!(!is_code_in(&fault, &["CODE_0", "CODE_2"]));
    }

    #[test]
    fn is_code_in_foreign_error_matches_default_only() {
        let err = io::Error::other("generic");
        assert!(is_code_in(&err, &[DEFAULT_CODE]));
        assert!(!is_code_in(&err, &["CODE_1"]));
    }

    #[test]
    fn as_fault_is_identity_for_faults() {
        let fault = new("boom", [with_code("KEEP")]);
        let trace = fault.trace().to_string();
        let same = as_fault(fault);
        assert_eq!(same.code(), "KEEP");
        // Identity path adds no frame.
        assert_eq!(same.trace(), trace);
    }

    #[test]
    fn as_fault_wraps_foreign_errors() {
        let fault = as_fault(io::Error::other("generic"));
        assert_eq!(fault.message(), "generic");
        assert!(!fault.trace().is_empty());
    }

    #[test]
    fn category_overwritten_when_code_matches() {
        let fault = new("boom", [with_code("C1")]);
        let fault = wrap_with_category_on_codes(fault, Category::Validation, &["C1", "C2"]);
        assert_eq!(fault.category(), Category::Validation);
    }

    #[test]
    fn category_untouched_when_code_does_not_match() {
        let fault = new("boom", [with_code("C3")]);
        let fault = wrap_with_category_on_codes(fault, Category::Validation, &["C1", "C2"]);
        assert_eq!(fault.category(), Category::Internal);
    }

    #[test]
    fn foreign_error_promoted_through_default_code() {
        let fault =
            wrap_with_category_on_codes(io::Error::other("generic"), Category::Validation, &[DEFAULT_CODE]);
        assert_eq!(fault.category(), Category::Validation);
    }

    #[test]
    fn wrap_with_category_adds_a_frame() {
        let fault = wrap_with_category_on_codes(io::Error::other("generic"), Category::Validation, &[]);
        assert!(fault.trace().starts_with("[query.rs:"), "trace: {}", fault.trace());
    }
}
