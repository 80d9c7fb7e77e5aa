//! The structured error value and its construction entry points.

use crate::category::Category;
use crate::options::{self, Map, Opt};
use crate::trace::{self, Frame};
use crate::{DEFAULT_CATEGORY, DEFAULT_CODE};
use std::fmt;
use std::sync::Arc;

/// Synthetic origin for faults created from a bare message.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Synthetic(String);

/// A structured error value.
///
/// Carries a machine-readable `code`, a human-readable `message`, a
/// [`Category`] driving boundary status mapping, per-input `fields` for
/// validation failures, free-form `details` for debugging, and a `trace` of
/// the call sites the fault passed through. The `origin` is the error the
/// fault was built from; it backs the [`Fault::is`] identity predicate and
/// never crosses the wire.
///
/// `Clone` deep-copies both maps while sharing the origin, so a clone can be
/// mutated freely without the ancestor observing anything, yet stays
/// `is`-equal to it. Every mutating entry point in this crate ([`wrap`], the
/// boundary codecs, [`wrap_with_category_on_codes`](crate::wrap_with_category_on_codes))
/// operates on an owned or cloned value; two holders of the same fault can
/// never observe each other's changes.
#[derive(Clone)]
pub struct Fault {
    pub(crate) code: String,
    pub(crate) message: String,
    pub(crate) category: Category,
    pub(crate) fields: Map,
    pub(crate) details: Map,
    pub(crate) trace: String,
    pub(crate) origin: Arc<dyn std::error::Error + Send + Sync>,
}

/// Builds a fresh fault with the default code and [`Category::Internal`],
/// captures one frame identifying the caller, then applies `opts` in order.
///
/// ```
/// use causeway::{new, with_category, with_code, Category};
///
/// let fault = new(
///     "order already exists",
///     [with_code("ORDER_EXISTS"), with_category(Category::Conflict)],
/// );
/// assert_eq!(fault.code(), "ORDER_EXISTS");
/// assert_eq!(fault.category(), Category::Conflict);
/// ```
#[track_caller]
pub fn new(message: impl Into<String>, opts: impl IntoIterator<Item = Opt>) -> Fault {
    let message = message.into();
    let mut fault = Fault {
        code: DEFAULT_CODE.to_string(),
        message: message.clone(),
        category: DEFAULT_CATEGORY,
        fields: Map::new(),
        details: Map::new(),
        trace: String::new(),
        origin: Arc::new(Synthetic(message)),
    };
    fault.push_caller_frame();
    options::apply_all(&mut fault, opts);
    fault
}

/// Adapts any error into a [`Fault`], appending exactly one trace frame
/// identifying the caller, then applying `opts` in order.
///
/// A value that already is a `Fault` is taken over as-is; callers that keep
/// the original pass a clone, which shares identity but none of the mutable
/// state. A foreign error becomes the fault's origin, so the identity
/// predicate still recognises it under arbitrarily many layers of wrapping,
/// and its rendered text becomes the message.
///
/// An absent error needs no branch here: `Option`/`Result` compose with
/// `wrap` through `map`/`map_err` (see [`ResultExt`]).
///
/// Calling `wrap` on a fault returned by [`new`] or by a boundary codec is
/// permitted and appends one more frame; no entry point is "already traced".
#[track_caller]
pub fn wrap<E>(err: E, opts: impl IntoIterator<Item = Opt>) -> Fault
where
    E: std::error::Error + Send + Sync + 'static,
{
    wrap_boxed(Box::new(err), opts)
}

#[track_caller]
pub(crate) fn wrap_boxed(
    err: Box<dyn std::error::Error + Send + Sync>,
    opts: impl IntoIterator<Item = Opt>,
) -> Fault {
    let mut fault = match err.downcast::<Fault>() {
        Ok(own) => *own,
        Err(foreign) => from_foreign(foreign),
    };
    fault.push_caller_frame();
    options::apply_all(&mut fault, opts);
    fault
}

pub(crate) fn from_foreign(foreign: Box<dyn std::error::Error + Send + Sync>) -> Fault {
    Fault {
        code: DEFAULT_CODE.to_string(),
        message: foreign.to_string(),
        category: DEFAULT_CATEGORY,
        fields: Map::new(),
        details: Map::new(),
        trace: String::new(),
        origin: Arc::from(foreign),
    }
}

impl Fault {
    /// Machine-readable code; [`DEFAULT_CODE`] when none was assigned.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Coarse classification driving boundary status mapping.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Per-input validation messages, keyed by field name.
    pub fn fields(&self) -> &Map {
        &self.fields
    }

    /// Free-form debugging metadata.
    pub fn details(&self) -> &Map {
        &self.details
    }

    /// Call-site breadcrumbs, newest frame first, `" ➡️ "`-separated.
    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// Identity predicate: true iff both faults share the same origin.
    /// Message equality is never consulted. A fault is always `is`-equal to
    /// itself and to its clones.
    pub fn is(&self, target: &Fault) -> bool {
        Arc::ptr_eq(&self.origin, &target.origin)
    }

    /// Rebuilds a fault from deserialized parts with a fresh synthetic
    /// origin. Identity never crosses the wire.
    pub(crate) fn from_parts(
        code: String,
        message: String,
        category: Category,
        fields: Map,
        details: Map,
        trace: String,
    ) -> Self {
        let origin = Arc::new(Synthetic(message.clone()));
        Self {
            code,
            message,
            category,
            fields,
            details,
            trace,
            origin,
        }
    }

    #[track_caller]
    pub(crate) fn push_caller_frame(&mut self) {
        let frame = Frame::caller();
        self.trace = trace::push(&self.trace, &frame);
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}] - {}", self.category, self.code, self.message)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Fault");
        d.field("code", &self.code);
        d.field("message", &self.message);
        d.field("category", &self.category);
        if !self.fields.is_empty() {
            d.field("fields", &self.fields);
        }
        if !self.details.is_empty() {
            d.field("details", &self.details);
        }
        if !self.trace.is_empty() {
            d.field("trace", &self.trace);
        }
        d.finish()
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.origin.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Branch-free wrapping for fallible call chains.
///
/// ```
/// use causeway::{with_details, Fault, ResultExt};
///
/// fn load(raw: &str) -> Result<u32, Fault> {
///     raw.parse::<u32>()
///         .wrap_fault_with([with_details([("raw", raw)])])
/// }
///
/// assert!(load("7").is_ok());
/// assert_eq!(load("x").unwrap_err().details()["raw"], "x");
/// ```
pub trait ResultExt<T> {
    /// Wraps the error side into a [`Fault`], appending one caller frame.
    fn wrap_fault(self) -> Result<T, Fault>;

    /// Like [`ResultExt::wrap_fault`], applying `opts` after the frame.
    fn wrap_fault_with(self, opts: impl IntoIterator<Item = Opt>) -> Result<T, Fault>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn wrap_fault(self) -> Result<T, Fault> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(wrap(err, [])),
        }
    }

    #[track_caller]
    fn wrap_fault_with(self, opts: impl IntoIterator<Item = Opt>) -> Result<T, Fault> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(wrap(err, opts)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{with_code, with_details, with_fields};
    use std::io;

    #[test]
    fn new_defaults() {
        let fault = new("boom", []);
        assert_eq!(fault.code(), DEFAULT_CODE);
        assert_eq!(fault.category(), Category::Internal);
        assert_eq!(fault.message(), "boom");
        assert!(fault.fields().is_empty());
        assert!(fault.details().is_empty());
        assert!(!fault.trace().is_empty());
    }

    #[test]
    fn display_renders_category_code_message() {
        let fault = new("nope", [with_code("C1")]);
        assert_eq!(fault.to_string(), "[internal: C1] - nope");
    }

    #[test]
    fn debug_skips_empty_maps() {
        let fault = new("boom", []);
        let rendered = format!("{fault:?}");
        assert!(rendered.contains("boom"));
        assert!(!rendered.contains("fields"));
        assert!(!rendered.contains("details"));
    }

    #[test]
    fn wrap_foreign_error_takes_its_message() {
        let fault = wrap(io::Error::other("disk gone"), []);
        assert_eq!(fault.message(), "disk gone");
        assert_eq!(fault.category(), Category::Internal);
        assert_eq!(fault.code(), DEFAULT_CODE);
    }

    #[test]
    fn wrap_preserves_identity_through_layers() {
        let first = wrap(io::Error::other("disk gone"), []);
        let second = wrap(first.clone(), []);
        let third = wrap(second.clone(), []);
        assert!(third.is(&first));
        assert!(third.is(&second));
    }

    #[test]
    fn fault_is_equal_to_itself_and_its_clone() {
        let fault = new("boom", []);
        assert!(fault.is(&fault));
        assert!(fault.clone().is(&fault));
    }

    #[test]
    fn distinct_faults_are_not_identical() {
        let a = new("boom", []);
        let b = new("boom", []);
        assert!(!a.is(&b));
    }

    #[test]
    fn wrap_appends_one_frame_and_keeps_existing_state() {
        let original = new("boom", [with_code("C1"), with_details([("k", "v")])]);
        let wrapped = wrap(original.clone(), []);
        assert_eq!(wrapped.code(), "C1");
        assert_eq!(wrapped.details()["k"], "v");
        assert!(wrapped.trace().contains(trace::SEPARATOR));
        assert!(wrapped.trace().len() > original.trace().len());
    }

    #[test]
    fn clone_independence() {
        let original = new("boom", [with_details([("k", "v")]), with_fields([("a", "e1")])]);
        let mut copy = wrap(original.clone(), [with_details([("k", "v2")]), with_fields([("a", "e2")])]);
        copy.code = "MUTATED".into();
        assert_eq!(original.details()["k"], "v");
        assert_eq!(original.fields()["a"], "e1");
        assert_eq!(original.code(), DEFAULT_CODE);
        assert_eq!(copy.details()["k"], "v2 | v");
        assert_eq!(copy.fields()["a"], "e2");
    }

    #[test]
    fn source_exposes_the_origin() {
        let fault = wrap(io::Error::other("disk gone"), []);
        let source = std::error::Error::source(&fault).expect("origin");
        assert_eq!(source.to_string(), "disk gone");
        assert!(source.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn trace_points_at_this_file() {
        let fault = new("boom", []);
        assert!(fault.trace().starts_with("[fault.rs:"), "trace: {}", fault.trace());
    }

    #[test]
    fn result_ext_wraps_err_side_only() {
        let ok: Result<u32, io::Error> = Ok(7);
        assert_eq!(ok.wrap_fault().unwrap(), 7);

        let err: Result<u32, io::Error> = Err(io::Error::other("boom"));
        let fault = err.wrap_fault_with([with_code("IO")]).unwrap_err();
        assert_eq!(fault.code(), "IO");
        assert!(fault.trace().contains("fault.rs"));
    }

    #[test]
    fn fault_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Fault>();
    }
}
