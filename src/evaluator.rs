//! Pure access evaluation of a resolved route config against the session.

use tracing::warn;

use crate::types::{ConditionKind, Decision, Operator, RouteConfig, Session, TableVersion};

/// Where denied navigations go when the rule names no redirect.
pub const DEFAULT_DENY_REDIRECT: &str = "/login";

/// Evaluate a resolved route config against the current session.
///
/// A missing config, or a config without an `allow` rule, is public: routes
/// not decorated with an access rule allow everyone by default. Unrecognized
/// condition kinds are logged and treated as failing, never as errors.
///
/// This is a pure function of its inputs (modulo the warn log); `version` is
/// threaded through onto the resulting [`Decision`] for diagnostics.
pub fn evaluate_access(
    config: Option<&RouteConfig>,
    session: Option<&Session>,
    version: &TableVersion,
) -> Decision {
    let Some(rule) = config.and_then(|c| c.allow.as_ref()) else {
        return Decision::Allow {
            version: version.clone(),
        };
    };

    let mut failed: Vec<String> = Vec::new();
    let mut any_passed = false;
    let mut all_passed = true;

    for condition in &rule.when.conditions {
        if condition.rule.passes(session) {
            any_passed = true;
        } else {
            if let ConditionKind::Unrecognized(raw) = &condition.rule {
                warn!(
                    event = "Access",
                    phase = "Condition",
                    rule = raw.as_str(),
                    label = condition.label.as_str(),
                    "unrecognized condition rule treated as failing"
                );
            }
            all_passed = false;
            failed.push(condition.failed_label());
        }
    }

    let allowed = match rule.when.operator {
        Operator::And => all_passed,
        Operator::Or => any_passed,
    };

    if allowed {
        Decision::Allow {
            version: version.clone(),
        }
    } else {
        Decision::Deny {
            redirect_to: rule
                .redirect_on_deny
                .clone()
                .unwrap_or_else(|| DEFAULT_DENY_REDIRECT.to_string()),
            exclude_redirect_query: rule.exclude_redirect_query,
            failed,
            version: version.clone(),
        }
    }
}
