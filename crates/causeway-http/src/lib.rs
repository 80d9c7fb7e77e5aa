//! HTTP response codec for causeway faults.
//!
//! [`respond`] renders any error as a JSON response: the category picks the
//! status line, and the body carries the fault's code, message and details.
//! An unclassified fault — one whose code is still the empty default — gets
//! a fixed generic body instead, so internals never leak to clients that
//! were not meant to see them.
//!
//! Handlers that return `Result<_, Fault>` use the [`HttpFault`] wrapper and
//! `?`:
//!
//! ```
//! use causeway::{new, with_category, with_code, Category, Fault};
//! use causeway_http::HttpFault;
//!
//! fn find_order() -> Result<(), Fault> {
//!     Err(new(
//!         "order already exists",
//!         [with_code("ORDER_EXISTS"), with_category(Category::Conflict)],
//!     ))
//! }
//!
//! async fn create_order() -> Result<&'static str, HttpFault> {
//!     find_order()?;
//!     Ok("created")
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use causeway::{Category, Fault, Map};
use serde::Serialize;

/// Code reported by the generic body for unclassified errors.
pub const GENERIC_CODE: &str = "INTERNAL";

/// Fixed body emitted for unclassified errors. Deliberately static: an error
/// nobody assigned a code to is presumed to carry internals.
const GENERIC_BODY: &str = r#"{"code": "INTERNAL", "message": "Internal server error"}"#;

#[derive(Serialize)]
struct Body {
    code: String,
    message: String,
    details: Map,
    #[serde(skip_serializing_if = "Map::is_empty")]
    fields: Map,
}

/// Fixed table: category to HTTP status line.
fn status_for(category: Category) -> StatusCode {
    match category {
        Category::Validation => StatusCode::BAD_REQUEST,
        Category::NotFound => StatusCode::NOT_FOUND,
        Category::Conflict => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders any error as a JSON error response.
///
/// A foreign error is wrapped first (one trace frame, internal category);
/// a fault passes through untouched. An absent error needs no call here —
/// `Option`/`Result` decide before this point.
#[track_caller]
pub fn respond<E>(err: E) -> Response
where
    E: std::error::Error + Send + Sync + 'static,
{
    render(causeway::as_fault(err))
}

fn render(fault: Fault) -> Response {
    let status = status_for(fault.category());
    let body = if fault.code() == causeway::DEFAULT_CODE {
        GENERIC_BODY.as_bytes().to_vec()
    } else {
        let body = Body {
            code: fault.code().to_string(),
            message: fault.message().to_string(),
            details: fault.details().clone(),
            fields: fault.fields().clone(),
        };
        match serde_json::to_vec(&body) {
            Ok(bytes) => bytes,
            // A fault that cannot be marshalled means the process would keep
            // running while misreporting errors; stop it instead.
            Err(err) => panic!("cannot marshal error body: {err}; original error was: {fault}"),
        }
    };
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Wrapper that lets axum handlers return faults with `?`.
#[derive(Debug)]
pub struct HttpFault(Fault);

impl HttpFault {
    /// The wrapped fault.
    pub fn fault(&self) -> &Fault {
        &self.0
    }
}

impl From<Fault> for HttpFault {
    fn from(fault: Fault) -> Self {
        Self(fault)
    }
}

impl IntoResponse for HttpFault {
    fn into_response(self) -> Response {
        render(self.0)
    }
}
