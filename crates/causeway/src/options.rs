//! Composable mutators applied at construction or wrap time.

use crate::category::Category;
use crate::fault::Fault;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// String-to-string map used for a fault's fields and details.
///
/// `BTreeMap` keeps iteration (and therefore serialization) deterministic.
pub type Map = BTreeMap<String, String>;

/// A single deferred mutation of a [`Fault`].
///
/// Options apply strictly in the order given; a later option overrides an
/// earlier one for the same field, except [`Opt::Details`] which merges.
/// Construct values through [`with_code`], [`with_category`], [`with_fields`],
/// [`with_details`] and [`with_prefix`].
#[derive(Debug, Clone)]
pub enum Opt {
    /// Overwrite the machine-readable code.
    Code(String),
    /// Overwrite the category.
    Category(Category),
    /// Replace the validation fields wholesale. Never merged.
    Fields(Map),
    /// Merge debugging details. An existing key keeps its old value behind
    /// the new one: `"new | old"`.
    Details(Map),
    /// Namespace the trace and the details keys under a service name.
    Prefix(String),
}

/// Sets the error code. Without it a fault keeps [`DEFAULT_CODE`](crate::DEFAULT_CODE).
pub fn with_code(code: impl Into<String>) -> Opt {
    Opt::Code(code.into())
}

/// Sets the category. Without it a fault is [`Category::Internal`].
pub fn with_category(category: Category) -> Opt {
    Opt::Category(category)
}

/// Replaces the validation fields wholesale, e.g.
/// `{"username": "too short", "email": "invalid format"}`.
/// Unlike [`with_details`] this never merges.
pub fn with_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Opt
where
    K: Into<String>,
    V: Into<String>,
{
    Opt::Fields(collect(fields))
}

/// Adds debugging metadata. A key that already exists accumulates instead of
/// being overwritten: the value becomes `"new | old"`, most recent context
/// first.
pub fn with_details<K, V>(details: impl IntoIterator<Item = (K, V)>) -> Opt
where
    K: Into<String>,
    V: Into<String>,
{
    Opt::Details(collect(details))
}

/// Namespaces a fault under `prefix`, designed for propagation between
/// services: the trace becomes `">>> prefix >>> <trace>"` and every details
/// key `k` becomes `prefix.k`. Fields are left alone.
pub fn with_prefix(prefix: impl Into<String>) -> Opt {
    Opt::Prefix(prefix.into())
}

fn collect<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Map
where
    K: Into<String>,
    V: Into<String>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

impl Opt {
    pub(crate) fn apply(self, fault: &mut Fault) {
        match self {
            Self::Code(code) => fault.code = code,
            Self::Category(category) => fault.category = category,
            Self::Fields(fields) => fault.fields = fields,
            Self::Details(details) => {
                for (key, value) in details {
                    match fault.details.entry(key) {
                        Entry::Occupied(mut slot) => {
                            let merged = format!("{value} | {}", slot.get());
                            slot.insert(merged);
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(value);
                        }
                    }
                }
            }
            Self::Prefix(prefix) => {
                fault.trace = format!(">>> {prefix} >>> {}", fault.trace);
                fault.details = std::mem::take(&mut fault.details)
                    .into_iter()
                    .map(|(key, value)| (format!("{prefix}.{key}"), value))
                    .collect();
            }
        }
    }
}

pub(crate) fn apply_all(fault: &mut Fault, opts: impl IntoIterator<Item = Opt>) {
    for opt in opts {
        opt.apply(fault);
    }
}
