//! Call-site capture for fault traces.
//!
//! A trace is a human-readable breadcrumb chain, one frame per
//! construction/wrap/codec entry point the fault passed through. Frames are
//! rendered `[file:line] function` and joined newest-first with [`SEPARATOR`].
//!
//! File and line come from [`std::panic::Location`], propagated through the
//! `#[track_caller]` entry points of this crate. The enclosing function name
//! is resolved from a captured backtrace by matching file and line. An empty
//! backtrace means the host runtime cannot introspect its own stack; a
//! truncated trace would mislead anyone debugging from it, so that case
//! aborts. A merely unresolved symbol degrades to `?` because file and line
//! are still exact.

use std::panic::Location;

/// Separator between frames; the newest frame sits left of it.
pub(crate) const SEPARATOR: &str = " ➡️ ";

/// One captured call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    file: &'static str,
    line: u32,
    function: String,
}

impl Frame {
    /// Captures the call site of the nearest caller outside the
    /// `#[track_caller]` chain.
    #[track_caller]
    pub(crate) fn caller() -> Self {
        let location = Location::caller();
        let file = basename(location.file());
        let function = resolve_function(file, location.line());
        Self {
            file,
            line: location.line(),
            function,
        }
    }

    pub(crate) fn render(&self) -> String {
        format!("[{}:{}] {}", self.file, self.line, self.function)
    }
}

/// Prepends `frame` to `trace`, keeping the newest frame first.
pub(crate) fn push(trace: &str, frame: &Frame) -> String {
    if trace.is_empty() {
        frame.render()
    } else {
        format!("{}{}{}", frame.render(), SEPARATOR, trace)
    }
}

/// Last path component, tolerating both separators.
fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Finds the function enclosing `file:line` in the current backtrace.
fn resolve_function(file: &str, line: u32) -> String {
    let backtrace = backtrace::Backtrace::new();
    let frames = backtrace.frames();
    assert!(
        !frames.is_empty(),
        "causeway: the host runtime cannot capture a call stack"
    );
    for frame in frames {
        for symbol in frame.symbols() {
            let Some(symbol_file) = symbol.filename() else {
                continue;
            };
            if symbol.lineno() != Some(line) {
                continue;
            }
            let same_file = symbol_file
                .file_name()
                .is_some_and(|name| name.to_string_lossy() == file);
            if !same_file {
                continue;
            }
            if let Some(name) = symbol.name() {
                return short_symbol(&name.to_string());
            }
        }
    }
    "?".to_string()
}

/// Strips the module path and hash disambiguator from a mangled symbol,
/// keeping only the trailing function name.
fn short_symbol(name: &str) -> String {
    let name = strip_hash(name);
    match name.rfind("::") {
        Some(idx) => name[idx + 2..].to_string(),
        None => name.to_string(),
    }
}

/// Symbol names usually end with a `::h<16 hex digits>` disambiguator.
fn strip_hash(name: &str) -> &str {
    if let Some(idx) = name.rfind("::h") {
        let tail = &name[idx + 3..];
        if tail.len() == 16 && tail.chars().all(|c| c.is_ascii_hexdigit()) {
            return &name[..idx];
        }
    }
    name
}
