//! End-to-end navigation scenarios against a realistic route table.

use serde_json::json;
use yare::parameterized;

use crate::snapshot_decision;
use crate::{RouteEngine, Session};

/// The route table of the CRM front-end: public auth pages, protected app
/// pages, and a protected admin subtree.
const CRM_TABLE: &str = r#"
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
    "/callback": {"title": "Authentication Callback"},
    "/error": {"title": "Error"},
    "/reset-password/:app_id/:fields": {"title": "Reset Password"},
    "/contacts": {
        "title": "Contacts",
        "allow": {
            "when": {"conditions": [{"label": "auth", "rule": "authenticated"}], "operator": "AND"},
            "redirectOnDeny": "/login"
        }
    },
    "/contacts/:id": {
        "title": "Contact Details",
        "allow": {
            "when": {"conditions": [{"label": "auth", "rule": "authenticated"}], "operator": "AND"},
            "redirectOnDeny": "/login"
        }
    },
    "/admin/**/*": {
        "allow": {
            "when": {"conditions": [{"label": "auth", "rule": "authenticated"}], "operator": "AND"},
            "redirectOnDeny": "/login"
        }
    }
}
"#;

fn engine() -> RouteEngine {
    RouteEngine::new_from_str(CRM_TABLE).unwrap()
}

fn session() -> Session {
    Session::new(json!({"id": "u-1", "email": "alice@example.com"}))
}

#[parameterized(
    login_is_public = { "/login", false, true },
    signup_is_public = { "/signup", false, true },
    reset_password_is_public = { "/reset-password/app1/email", false, true },
    dashboard_needs_auth = { "/", false, false },
    contacts_needs_auth = { "/contacts", false, false },
    contact_detail_needs_auth = { "/contacts/42", false, false },
    admin_subtree_needs_auth = { "/admin/users/7/edit", false, false },
    dashboard_with_session = { "/", true, true },
    contact_detail_with_session = { "/contacts/42", true, true },
    admin_with_session = { "/admin/users", true, true },
    unknown_route_is_unrestricted = { "/totally/unknown", false, true },
)]
fn navigation(path: &str, with_session: bool, expected_allowed: bool) {
    let engine = engine();
    let session = with_session.then(session);
    let decision = engine.authorize(path, session.as_ref()).unwrap();
    assert_eq!(decision.allowed(), expected_allowed, "path: {path}");
}

#[test]
fn denied_navigation_redirects_to_login_with_query() {
    let engine = engine();
    let decision = engine.authorize("/contacts/42", None).unwrap();
    assert!(!decision.allowed());
    assert_eq!(decision.redirect_to(), Some("/login"));
    assert_eq!(
        decision.redirect_target("/contacts/42").as_deref(),
        Some("/login?redirect=%2Fcontacts%2F42")
    );
}

#[test]
fn authorize_is_idempotent() {
    let engine = engine();
    let first = engine.authorize("/contacts/42", None).unwrap();
    let second = engine.authorize("/contacts/42", None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn admin_deny_decision_shape() {
    let engine = engine();
    let decision = engine.authorize("/admin/users", None).unwrap();
    snapshot_decision!(decision, @r#"
    {
      "Deny": {
        "redirect_to": "/login",
        "exclude_redirect_query": false,
        "failed": [
          "auth"
        ],
        "version": "[version]"
      }
    }
    "#);
}

#[test]
fn public_allow_decision_shape() {
    let engine = engine();
    let decision = engine.authorize("/login", None).unwrap();
    snapshot_decision!(decision, @r#"
    {
      "Allow": {
        "version": "[version]"
      }
    }
    "#);
}
