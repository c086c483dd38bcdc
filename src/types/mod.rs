//! Data model types for the route table, sessions, and decisions.
//!
//! Wire forms follow the route table document:
//! - Patterns: `/contacts`, `/contacts/:id`, `/admin/*`, `/admin/**/*`
//! - Rules: `{"when": {"conditions": [..], "operator": "AND"},
//!   "redirectOnDeny": "/login", "excludeRedirectQuery": false}`
//! - Condition kinds: `"public"`, `"authenticated"`; anything else is kept
//!   as-is and fails evaluation.

mod condition;
mod decision;
mod pattern;
mod route_config;
mod rule;
mod session;

pub use condition::{Condition, ConditionKind};
pub use decision::{Decision, TableVersion};
pub use pattern::{Pattern, PatternKind};
pub use route_config::RouteConfig;
pub use rule::{AccessRule, Operator, When};
pub use session::Session;
