//! Route resolution and access evaluation core.
//!
//! Two cooperating pieces: a resolver that finds the best-matching entry in a
//! declarative route table via a specificity score, and an evaluator that
//! turns the resolved rule plus the current session into an allow/redirect
//! [`Decision`]. Both are pure; [`RouteEngine`] wraps them in a cloneable,
//! thread-safe handle with hot reload.

pub use engine::RouteEngine;
pub use error::RouteError;
pub use evaluator::{DEFAULT_DENY_REDIRECT, evaluate_access};
pub use loader::compile_table;
pub use table::RouteTable;
pub use types::{
    AccessRule, Condition, ConditionKind, Decision, Operator, Pattern, PatternKind, RouteConfig,
    Session, TableVersion, When,
};

mod engine;
mod error;
mod evaluator;
mod loader;
#[cfg(feature = "observability")]
pub mod metrics;
mod table;
mod types;

#[cfg(test)]
mod tests;
