//! The route guard: a coarse, synchronous, side-effect-free gate evaluated
//! before a protected route renders.
//!
//! Cookie presence is necessary but not sufficient for a valid session, so
//! the guard only filters out the "definitely unauthenticated" case. Real
//! verification happens after mount, via the session cache and the gateway's
//! session-check call; an invalid session discovered there is routed back to
//! login by application logic, never by the guard (that split is what avoids
//! redirect loops).

use tracing::debug;

use crate::config::{GuardConfig, SessionConfig};

/// Cookie holding the short-lived access credential.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie holding the long-lived refresh credential.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// The guard's verdict for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the requested path unchanged.
    PassThrough,
    /// Redirect to the given path (the login page).
    Redirect(String),
}

/// Pre-render gate over a fixed set of protected path prefixes.
pub struct RouteGuard {
    protected_prefixes: Vec<String>,
    login_path: String,
}

impl RouteGuard {
    pub fn new(guard_config: &GuardConfig, session_config: &SessionConfig) -> Self {
        RouteGuard {
            protected_prefixes: guard_config.protected_prefixes.clone(),
            login_path: session_config.login_path.clone(),
        }
    }

    /// Decides whether the navigation may proceed, from the requested path
    /// and the raw `Cookie` header attached to the request. No network calls;
    /// this runs on every matching navigation.
    pub fn evaluate(&self, path: &str, cookie_header: &str) -> GuardOutcome {
        // The login path is never gated: a stale cookie must not be able to
        // bounce the user away from the login page.
        if self.matches_path(&self.login_path, path) {
            return GuardOutcome::PassThrough;
        }

        if !self.is_protected(path) {
            return GuardOutcome::PassThrough;
        }

        if has_cookie(cookie_header, ACCESS_TOKEN_COOKIE)
            || has_cookie(cookie_header, REFRESH_TOKEN_COOKIE)
        {
            return GuardOutcome::PassThrough;
        }

        debug!(
            "No auth cookies present for protected path '{}'; redirecting to '{}'",
            path, self.login_path
        );
        GuardOutcome::Redirect(self.login_path.clone())
    }

    fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| self.matches_path(prefix, path))
    }

    /// Segment-aware prefix match: "/dashboard" matches "/dashboard" and
    /// "/dashboard/foo" but not "/dashboards".
    fn matches_path(&self, prefix: &str, path: &str) -> bool {
        let prefix = prefix.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }
}

/// Checks whether a cookie with the given name is present in a raw `Cookie`
/// header value.
fn has_cookie(cookie_header: &str, name: &str) -> bool {
    cookie_header.split(';').any(|pair| {
        let mut parts = pair.splitn(2, '=');
        let cookie_name = parts.next().unwrap_or("").trim();
        let value = parts.next().unwrap_or("").trim();
        cookie_name == name && !value.is_empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> RouteGuard {
        RouteGuard::new(&GuardConfig::default(), &SessionConfig::default())
    }

    /// Test that a protected path without auth cookies redirects to login.
    #[test]
    fn test_protected_path_without_cookies_redirects() {
        assert_eq!(
            guard().evaluate("/dashboard/foo", ""),
            GuardOutcome::Redirect("/login".to_string())
        );
    }

    /// Test that a protected path with an access-token cookie passes through.
    #[test]
    fn test_protected_path_with_access_cookie_passes() {
        assert_eq!(
            guard().evaluate("/dashboard/foo", "access_token=abc123"),
            GuardOutcome::PassThrough
        );
    }

    /// Test that a refresh-token cookie alone is enough to pass the coarse
    /// check (validity is verified later, server-side).
    #[test]
    fn test_refresh_cookie_alone_passes() {
        assert_eq!(
            guard().evaluate("/customers", "refresh_token=r1; theme=dark"),
            GuardOutcome::PassThrough
        );
    }

    /// Test that the login path is never redirected, even without cookies.
    #[test]
    fn test_login_path_is_never_gated() {
        assert_eq!(guard().evaluate("/login", ""), GuardOutcome::PassThrough);
    }

    /// Test that an unmatched prefix passes through ungated.
    #[test]
    fn test_unprotected_path_passes_through() {
        assert_eq!(
            guard().evaluate("/public-page", ""),
            GuardOutcome::PassThrough
        );
    }

    /// Test that prefix matching is segment-aware.
    #[test]
    fn test_prefix_match_is_segment_aware() {
        let guard = guard();
        assert_eq!(
            guard.evaluate("/dashboard", ""),
            GuardOutcome::Redirect("/login".to_string())
        );
        // "/dashboards" is a different route, not a protected one.
        assert_eq!(guard.evaluate("/dashboards", ""), GuardOutcome::PassThrough);
    }

    /// Test that a cookie with an empty value does not count as present.
    #[test]
    fn test_empty_cookie_value_does_not_count() {
        assert_eq!(
            guard().evaluate("/dashboard", "access_token="),
            GuardOutcome::Redirect("/login".to_string())
        );
    }
}
