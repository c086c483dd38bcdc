use std::sync::{Arc, RwLock};

use itertools::Itertools;
use tracing::{debug, info};

use crate::error::RouteError;
use crate::evaluator::evaluate_access;
use crate::loader;
use crate::table::RouteTable;
use crate::types::{Decision, Pattern, RouteConfig, Session, TableVersion};

#[cfg(feature = "observability")]
use crate::metrics::{self, EvaluationStats, ReloadStats};

struct TableState {
    table: RouteTable,
    version: TableVersion,
}

/// The main engine handle. Cloneable and thread-safe.
///
/// Construct one explicitly at startup from the route table document and pass
/// the handle to whatever needs it; there is no implicit global instance. The
/// table is compiled once and shared behind a lock so reloads swap it
/// atomically for every clone of the handle.
#[derive(Clone)]
pub struct RouteEngine {
    inner: Arc<RwLock<TableState>>,
}

impl RouteEngine {
    pub fn new_from_str(table_json: &str) -> Result<Self, RouteError> {
        let table = loader::compile_table(table_json)?;
        Ok(RouteEngine {
            inner: Arc::new(RwLock::new(TableState {
                table,
                version: TableVersion::for_source(table_json),
            })),
        })
    }

    /// Replace the route table, stamping a fresh version.
    pub fn reload_from_str(&self, table_json: &str) -> Result<(), RouteError> {
        let table = loader::compile_table(table_json)?;
        let version = TableVersion::for_source(table_json);
        {
            let mut state = self.inner.write()?;
            state.table = table;
            state.version = version.clone();
        }
        info!(event = "Reload", version = version.to_string());

        #[cfg(feature = "observability")]
        if let Some(sink) = metrics::sink() {
            sink.on_reload(&ReloadStats {
                reload_time: std::time::SystemTime::now(),
            });
        }

        Ok(())
    }

    /// Find the best-matching route config for `path`, if any.
    pub fn resolve(&self, path: &str) -> Result<Option<RouteConfig>, RouteError> {
        let state = self.inner.read()?;
        Ok(state.table.resolve(path).cloned())
    }

    /// Resolve `path` and evaluate its access rule against `session`.
    pub fn authorize(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> Result<Decision, RouteError> {
        #[cfg(feature = "observability")]
        let started = std::time::Instant::now();

        debug!(
            event = "Navigation",
            phase = "Request",
            path = path,
            session = session.is_some()
        );

        let state = self.inner.read()?;
        let resolved = state.table.resolve_entry(path);

        debug!(
            event = "Navigation",
            phase = "Resolution",
            path = path,
            matched = resolved.map_or_else(|| "<none>".to_string(), |(p, _)| p.to_string())
        );

        let decision = evaluate_access(resolved.map(|(_, c)| c), session, &state.version);

        debug!(
            event = "Navigation",
            phase = "Result",
            path = path,
            decision = decision.to_string()
        );

        #[cfg(feature = "observability")]
        if let Some(sink) = metrics::sink() {
            sink.on_evaluation(&EvaluationStats {
                duration: started.elapsed(),
                allowed: decision.allowed(),
                path: path.to_string(),
                matched_pattern: resolved.map(|(p, _)| p.to_string()),
            });
        }

        Ok(decision)
    }

    /// The version stamp of the currently loaded table.
    pub fn version(&self) -> Result<TableVersion, RouteError> {
        let state = self.inner.read()?;
        Ok(state.version.clone())
    }

    /// All patterns in the table, most specific first.
    pub fn patterns(&self) -> Result<Vec<Pattern>, RouteError> {
        let state = self.inner.read()?;
        Ok(state
            .table
            .patterns()
            .cloned()
            .sorted_by(|a, b| b.specificity().cmp(&a.specificity()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yare::parameterized;

    const TEST_TABLE: &str = r#"
    {
        "/": {
            "title": "Dashboard",
            "allow": {
                "when": {"conditions": [{"label": "auth", "rule": "authenticated"}], "operator": "AND"},
                "redirectOnDeny": "/login"
            }
        },
        "/login": {"title": "Login"},
        "/signup": {"title": "Sign Up"},
        "/contacts/:id": {
            "title": "Contact Details",
            "allow": {
                "when": {"conditions": [{"label": "auth", "rule": "authenticated"}], "operator": "AND"},
                "redirectOnDeny": "/login"
            }
        },
        "/admin/*": {
            "allow": {
                "when": {"conditions": [{"label": "auth", "rule": "authenticated"}], "operator": "AND"},
                "redirectOnDeny": "/login"
            }
        },
        "/error": {
            "allow": {
                "when": {"conditions": [{"label": "pub", "rule": "public"}], "operator": "OR"},
                "excludeRedirectQuery": true
            }
        }
    }
    "#;

    const TEST_TABLE_OPEN_ADMIN: &str = r#"
    {
        "/admin/*": {
            "allow": {
                "when": {"conditions": [{"label": "pub", "rule": "public"}], "operator": "AND"}
            }
        }
    }
    "#;

    fn session() -> Session {
        Session::new(json!({"id": "u-1"}))
    }

    #[parameterized(
        dashboard_anonymous_deny = { "/", false, false },
        dashboard_authenticated_allow = { "/", true, true },
        login_anonymous_allow = { "/login", false, true },
        contact_detail_anonymous_deny = { "/contacts/42", false, false },
        contact_detail_authenticated_allow = { "/contacts/42", true, true },
        admin_anonymous_deny = { "/admin/users", false, false },
        admin_authenticated_allow = { "/admin/users", true, true },
        unconfigured_route_allow = { "/callback", false, true },
        public_or_rule_allow = { "/error", false, true },
    )]
    fn test_authorize(path: &str, with_session: bool, expected_allowed: bool) {
        let engine = RouteEngine::new_from_str(TEST_TABLE).unwrap();
        let session = with_session.then(session);
        let decision = engine.authorize(path, session.as_ref()).unwrap();
        assert_eq!(decision.allowed(), expected_allowed, "path: {path}");
        if !expected_allowed {
            assert_eq!(decision.redirect_to(), Some("/login"));
        }
    }

    #[test]
    fn test_denied_navigation_builds_redirect_target() {
        let engine = RouteEngine::new_from_str(TEST_TABLE).unwrap();
        let decision = engine.authorize("/admin/users", None).unwrap();
        assert_eq!(
            decision.redirect_target("/admin/users").as_deref(),
            Some("/login?redirect=%2Fadmin%2Fusers")
        );
    }

    #[test]
    fn test_resolve_returns_the_config() {
        let engine = RouteEngine::new_from_str(TEST_TABLE).unwrap();
        let config = engine.resolve("/contacts/42").unwrap().unwrap();
        assert_eq!(config.meta.get("title").unwrap(), "Contact Details");
        assert!(engine.resolve("/companies").unwrap().is_none());
    }

    #[test]
    fn test_reload_table() {
        let engine = RouteEngine::new_from_str(TEST_TABLE).unwrap();
        let before = engine.version().unwrap();

        assert!(!engine.authorize("/admin/users", None).unwrap().allowed());

        engine.reload_from_str(TEST_TABLE_OPEN_ADMIN).unwrap();
        let after = engine.version().unwrap();

        assert!(engine.authorize("/admin/users", None).unwrap().allowed());
        assert_ne!(before.hash, after.hash);
    }

    #[test]
    fn test_reload_rejects_bad_table_and_keeps_the_old_one() {
        let engine = RouteEngine::new_from_str(TEST_TABLE).unwrap();
        assert!(engine.reload_from_str("not json").is_err());
        // The previous table is still in effect.
        assert!(!engine.authorize("/", None).unwrap().allowed());
    }

    #[test]
    fn test_decisions_carry_the_table_version() {
        let engine = RouteEngine::new_from_str(TEST_TABLE).unwrap();
        let version = engine.version().unwrap();
        let decision = engine.authorize("/login", None).unwrap();
        assert_eq!(decision.version(), &version);
    }

    #[test]
    fn test_patterns_listing_is_most_specific_first() {
        let engine = RouteEngine::new_from_str(TEST_TABLE).unwrap();
        let patterns = engine.patterns().unwrap();
        assert_eq!(patterns.len(), 6);
        // Exact patterns lead, the wildcard trails.
        assert!(patterns.first().unwrap().raw().starts_with('/'));
        assert_eq!(patterns.last().unwrap().raw(), "/admin/*");
        let scores: Vec<u32> = patterns.iter().map(Pattern::specificity).collect();
        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn test_clones_share_the_table() {
        let engine = RouteEngine::new_from_str(TEST_TABLE).unwrap();
        let clone = engine.clone();
        engine.reload_from_str(TEST_TABLE_OPEN_ADMIN).unwrap();
        assert!(clone.authorize("/admin/users", None).unwrap().allowed());
    }
}
