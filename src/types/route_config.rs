//! Per-route configuration records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::rule::AccessRule;

/// The value side of a route table entry.
///
/// Besides the optional access rule, entries carry arbitrary metadata
/// (titles, layout hints, ...) which is preserved verbatim for the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Access rule for the route. `None` means the route is public.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<AccessRule>,
    /// Everything else in the entry, untouched.
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl RouteConfig {
    pub fn public() -> Self {
        RouteConfig::default()
    }

    pub fn with_rule(rule: AccessRule) -> Self {
        RouteConfig {
            allow: Some(rule),
            meta: Map::new(),
        }
    }
}
