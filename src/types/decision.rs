//! Access decisions with table version metadata.

use std::collections::hash_map::DefaultHasher;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

/// Version metadata for the route table used during an evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
pub struct TableVersion {
    /// Hash of the table source text.
    pub hash: String,
    /// When this table was loaded into the engine, as unix epoch milliseconds.
    pub loaded_at: String,
}

impl TableVersion {
    /// Stamp a version for a table compiled from `source`.
    pub fn for_source(source: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        source.hash(&mut hasher);
        let loaded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis().to_string())
            .unwrap_or_default();
        TableVersion {
            hash: format!("{:016x}", hasher.finish()),
            loaded_at,
        }
    }
}

impl Display for TableVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} @ {}", self.hash, self.loaded_at)
    }
}

/// The outcome of evaluating a route config against the current session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Decision {
    Allow {
        version: TableVersion,
    },
    Deny {
        /// Where the navigation layer should send the user.
        redirect_to: String,
        /// Whether to suppress the `redirect` query parameter.
        exclude_redirect_query: bool,
        /// Labels of the conditions that did not pass, for diagnostics.
        failed: Vec<String>,
        version: TableVersion,
    },
}

impl Decision {
    pub fn allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }

    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            Decision::Allow { .. } => None,
            Decision::Deny { redirect_to, .. } => Some(redirect_to),
        }
    }

    pub fn failed_labels(&self) -> &[String] {
        match self {
            Decision::Allow { .. } => &[],
            Decision::Deny { failed, .. } => failed,
        }
    }

    pub fn exclude_redirect_query(&self) -> bool {
        match self {
            Decision::Allow { .. } => false,
            Decision::Deny {
                exclude_redirect_query,
                ..
            } => *exclude_redirect_query,
        }
    }

    pub fn version(&self) -> &TableVersion {
        match self {
            Decision::Allow { version } | Decision::Deny { version, .. } => version,
        }
    }

    /// Build the full redirect target for a denied navigation.
    ///
    /// Appends the original path, URL-encoded, as a `redirect` query
    /// parameter (e.g. `/login?redirect=%2Fadmin%2Fusers`), unless the rule
    /// opted out with `excludeRedirectQuery`. Returns `None` for an allow.
    pub fn redirect_target(&self, original_path: &str) -> Option<String> {
        match self {
            Decision::Allow { .. } => None,
            Decision::Deny {
                redirect_to,
                exclude_redirect_query,
                ..
            } => {
                if *exclude_redirect_query {
                    return Some(redirect_to.clone());
                }
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("redirect", original_path)
                    .finish();
                Some(format!("{redirect_to}?{query}"))
            }
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Decision::Allow { version } => write!(f, "Allow(hash={})", version.hash),
            Decision::Deny {
                redirect_to,
                failed,
                version,
                ..
            } => write!(
                f,
                "Deny(hash={}; redirect={redirect_to}; failed=[{}])",
                version.hash,
                failed.join(", ")
            ),
        }
    }
}
