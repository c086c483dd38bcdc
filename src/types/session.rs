//! The authenticated-user context, owned by the surrounding auth layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque session record.
///
/// The evaluator only ever consults whether a session is present
/// (`Option<&Session>`); the claims inside are carried for the caller's
/// benefit and never inspected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session(Value);

impl Session {
    pub fn new(claims: Value) -> Self {
        Session(claims)
    }

    pub fn claims(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Session {
    fn from(claims: Value) -> Self {
        Session(claims)
    }
}
