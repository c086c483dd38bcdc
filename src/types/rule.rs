//! Declarative access rules as they appear in the route table.
//!
//! Wire form (camelCase, matching the table document):
//!
//! ```json
//! {
//!   "when": { "conditions": [{"label": "auth", "rule": "authenticated"}], "operator": "AND" },
//!   "redirectOnDeny": "/login",
//!   "excludeRedirectQuery": false
//! }
//! ```

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::condition::Condition;

/// How condition results are combined.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Operator {
    /// All conditions must pass. This is the default.
    #[default]
    And,
    /// At least one condition must pass.
    Or,
}

/// The condition set of an access rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct When {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub operator: Operator,
}

/// An access rule attached to a route config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    /// Conditions gating the route. An absent `when` block allows everyone,
    /// same as an empty AND condition list.
    #[serde(default)]
    pub when: When,
    /// Where to send a denied navigation. Falls back to `/login` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_on_deny: Option<String>,
    /// Suppress the `redirect` query parameter on the deny redirect.
    #[serde(default)]
    pub exclude_redirect_query: bool,
}
