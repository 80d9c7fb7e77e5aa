//! gRPC status codec for causeway faults.
//!
//! Server side, [`to_status`] folds a fault into a [`tonic::Status`]: the
//! category picks the status code through a fixed table, and the full
//! structure (code, message, category ordinal, fields, details, trace) rides
//! along as a JSON detail payload. Client side, [`from_status`] reverses the
//! trip, reconstructing an equivalent fault — or a best-effort one, via the
//! inverse code table, when the peer attached no payload.
//!
//! Crossing hops, callers namespace inbound faults with
//! [`with_prefix`](causeway::with_prefix) so details keys from different
//! services never collide:
//!
//! ```
//! use causeway_grpc::from_status;
//! use causeway::with_prefix;
//! # let status = causeway_grpc::to_status(causeway::new("boom", []), []);
//!
//! let (recognized, fault) = from_status(&status, [with_prefix("billing")]);
//! assert!(recognized);
//! assert!(fault.trace().starts_with(">>> billing >>> "));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use bytes::Bytes;
use causeway::{Category, Fault, FaultDto, Opt, with_category, with_details};
use tonic::{Code, Status};

/// Fixed forward table: category to gRPC status code.
fn code_for(category: Category) -> Code {
    match category {
        Category::Internal => Code::Internal,
        Category::Validation => Code::InvalidArgument,
        Category::NotFound => Code::NotFound,
        Category::Conflict => Code::AlreadyExists,
        Category::Authentication => Code::Unauthenticated,
        Category::Forbidden => Code::PermissionDenied,
        Category::Unrecognized(_) => Code::Unknown,
    }
}

/// Inverse table, used only when a status carries no structured payload.
fn category_for(code: Code) -> Option<Category> {
    Some(match code {
        Code::Internal => Category::Internal,
        Code::InvalidArgument => Category::Validation,
        Code::NotFound => Category::NotFound,
        Code::AlreadyExists => Category::Conflict,
        Code::Unauthenticated => Category::Authentication,
        Code::PermissionDenied => Category::Forbidden,
        _ => return None,
    })
}

/// Converts any error into an outbound [`Status`].
///
/// The error is wrapped (a fault is cloned-or-taken-over, a foreign error
/// normalised to [`Category::Internal`]), one trace frame is appended, and
/// `opts` apply — then the structure is serialized into the status details.
/// If that serialization fails the original error is never dropped: a plain
/// internal status embeds both the failure and the original rendering.
#[track_caller]
pub fn to_status<E>(err: E, opts: impl IntoIterator<Item = Opt>) -> Status
where
    E: std::error::Error + Send + Sync + 'static,
{
    let fault = causeway::wrap(err, opts);
    let dto = FaultDto::from(&fault);
    match serde_json::to_vec(&dto) {
        Ok(payload) => Status::with_details(
            code_for(fault.category()),
            fault.to_string(),
            Bytes::from(payload),
        ),
        Err(ser) => Status::internal(format!(
            "failed to attach structured error details: {ser}; original error was: {fault}"
        )),
    }
}

/// Converts an inbound [`Status`] back into a fault.
///
/// Returns `(true, fault)` when the status carried a parseable structured
/// payload, reconstructed field for field. Otherwise `(false, fault)` with
/// the category reverse-mapped from the status code (unmapped codes default
/// to [`Category::Internal`]) and the raw code/message kept as details.
/// Either way one trace frame is appended before `opts` apply.
#[track_caller]
pub fn from_status(status: &Status, opts: impl IntoIterator<Item = Opt>) -> (bool, Fault) {
    if !status.details().is_empty() {
        if let Ok(dto) = serde_json::from_slice::<FaultDto>(status.details()) {
            return (true, causeway::wrap(dto.into_fault(), opts));
        }
    }

    let mut base: Vec<Opt> = Vec::new();
    if let Some(category) = category_for(status.code()) {
        base.push(with_category(category));
    }
    base.push(with_details([
        ("grpc_code", format!("{:?}", status.code())),
        ("grpc_message", status.message().to_string()),
    ]));
    base.extend(opts);
    (false, causeway::new(status.message(), base))
}

/// Branch-free status conversion for tonic handlers.
///
/// ```
/// use causeway_grpc::StatusExt;
///
/// fn handler() -> Result<(), tonic::Status> {
///     let result: Result<(), std::io::Error> = Ok(());
///     result.into_status()
/// }
/// ```
pub trait StatusExt<T> {
    /// Converts the error side into a [`Status`] via [`to_status`].
    fn into_status(self) -> Result<T, Status>;

    /// Like [`StatusExt::into_status`], applying `opts` before conversion.
    fn into_status_with(self, opts: impl IntoIterator<Item = Opt>) -> Result<T, Status>;
}

impl<T, E> StatusExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn into_status(self) -> Result<T, Status> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(to_status(err, [])),
        }
    }

    #[track_caller]
    fn into_status_with(self, opts: impl IntoIterator<Item = Opt>) -> Result<T, Status> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(to_status(err, opts)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_table_is_total() {
        assert_eq!(code_for(Category::Internal), Code::Internal);
        assert_eq!(code_for(Category::Validation), Code::InvalidArgument);
        assert_eq!(code_for(Category::NotFound), Code::NotFound);
        assert_eq!(code_for(Category::Conflict), Code::AlreadyExists);
        assert_eq!(code_for(Category::Authentication), Code::Unauthenticated);
        assert_eq!(code_for(Category::Forbidden), Code::PermissionDenied);
        assert_eq!(code_for(Category::Unrecognized(9)), Code::Unknown);
    }

    #[test]
    fn inverse_table_mirrors_forward_table() {
        for category in [
            Category::Internal,
            Category::Validation,
            Category::NotFound,
            Category::Conflict,
            Category::Authentication,
            Category::Forbidden,
        ] {
            assert_eq!(category_for(code_for(category)), Some(category));
        }
        assert_eq!(category_for(Code::Unknown), None);
        assert_eq!(category_for(Code::DeadlineExceeded), None);
    }
}
