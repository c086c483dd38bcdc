//! Access conditions and their evaluation against a session.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::session::Session;

/// The kinds of access condition a route table may declare.
///
/// Each kind knows how to evaluate itself against the current session. Kinds
/// we do not recognize are preserved verbatim as [`ConditionKind::Unrecognized`]
/// so that loading a table never fails on them; they evaluate to a failure
/// instead (fail-closed).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// Always passes.
    Public,
    /// Passes iff a session is present.
    Authenticated,
    /// An unknown rule kind, kept as written in the table.
    Unrecognized(String),
}

impl ConditionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionKind::Public => "public",
            ConditionKind::Authenticated => "authenticated",
            ConditionKind::Unrecognized(raw) => raw,
        }
    }

    /// Evaluate this condition kind against the session.
    ///
    /// Only presence or absence of the session is consulted; its contents are
    /// opaque to the evaluator.
    pub fn passes(&self, session: Option<&Session>) -> bool {
        match self {
            ConditionKind::Public => true,
            ConditionKind::Authenticated => session.is_some(),
            ConditionKind::Unrecognized(_) => false,
        }
    }
}

impl From<&str> for ConditionKind {
    fn from(raw: &str) -> Self {
        match raw {
            "public" => ConditionKind::Public,
            "authenticated" => ConditionKind::Authenticated,
            other => ConditionKind::Unrecognized(other.to_string()),
        }
    }
}

impl Display for ConditionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ConditionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ConditionKind::from(raw.as_str()))
    }
}

/// A single labelled condition inside an access rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub label: String,
    pub rule: ConditionKind,
}

impl Condition {
    pub fn new(label: impl Into<String>, rule: ConditionKind) -> Self {
        Condition {
            label: label.into(),
            rule,
        }
    }

    /// The label reported when this condition fails.
    ///
    /// Unlabelled unrecognized conditions fall back to naming the raw rule,
    /// so diagnostics always point at something.
    pub(crate) fn failed_label(&self) -> String {
        if self.label.is_empty() {
            if let ConditionKind::Unrecognized(raw) = &self.rule {
                return format!("unknown rule: {raw}");
            }
        }
        self.label.clone()
    }
}
