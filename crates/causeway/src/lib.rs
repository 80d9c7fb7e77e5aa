//! Structured error values that survive service boundaries.
//!
//! Every [`Fault`] carries a machine-readable code, a coarse [`Category`]
//! that drives status mapping at boundaries, per-input validation `fields`,
//! free-form debugging `details`, and a human-readable trace of the call
//! sites it passed through. Companion crates move the whole structure across
//! a gRPC status channel (`causeway-grpc`) and an HTTP response body
//! (`causeway-http`) without loss.
//!
//! # Construction
//!
//! ```
//! use causeway::{new, with_category, with_code, with_fields, Category};
//!
//! let fault = new(
//!     "invalid signup form",
//!     [
//!         with_code("SIGNUP_INVALID"),
//!         with_category(Category::Validation),
//!         with_fields([("email", "invalid format")]),
//!     ],
//! );
//! assert_eq!(fault.fields()["email"], "invalid format");
//! ```
//!
//! # Wrapping
//!
//! Intermediate layers call [`wrap`] (or [`ResultExt::wrap_fault`]) to adapt
//! any error; each call appends exactly one trace frame. Wrapping never
//! mutates a value the caller still holds: a fault is taken over or cloned,
//! and clones deep-copy every map. Identity survives regardless — the
//! original cause is still recognised under many layers:
//!
//! ```
//! let cause = std::io::Error::other("disk gone");
//! let inner = causeway::wrap(cause, []);
//! let outer = causeway::wrap(inner.clone(), []);
//! assert!(outer.is(&inner));
//! ```
//!
//! # Trace contract
//!
//! Frames render `[file:line] function` and join newest-first with `" ➡️ "`.
//! Every construction/wrap/codec entry point appends exactly one frame;
//! calling [`wrap`] right after [`new`] is allowed and simply adds a second.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod dto;
mod fault;
mod options;
mod query;
mod trace;

pub mod db;
pub mod report;

pub use category::Category;
pub use dto::FaultDto;
pub use fault::{Fault, ResultExt, new, wrap};
pub use options::{Map, Opt, with_category, with_code, with_details, with_fields, with_prefix};
pub use query::{as_fault, get_category, get_code, is_code_in, wrap_with_category_on_codes};

/// Code of a fault that was never assigned one.
pub const DEFAULT_CODE: &str = "";

/// Category of a fault that was never assigned one.
pub const DEFAULT_CATEGORY: Category = Category::Internal;
