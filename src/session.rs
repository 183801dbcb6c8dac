//! The session cache: converts "cookie present" into "session valid".
//!
//! Pages ask this for the current identity after the route guard's coarse
//! check has let them render. The answer comes from the session-verification
//! endpoint through the request gateway and is memoized for a short TTL so
//! repeated page-level checks avoid redundant round trips.

use std::sync::Mutex;

use cached::{Cached, TimedCache};
use tracing::debug;

use crate::config::SessionConfig;
use crate::gateway::{Gateway, GatewayError, RequestDescriptor};
use crate::models::Identity;

pub struct SessionCache {
    gateway: Gateway,
    identity_path: String,
    cache: Mutex<TimedCache<(), Identity>>,
}

impl SessionCache {
    pub fn new(gateway: Gateway, session: &SessionConfig) -> Self {
        SessionCache {
            gateway,
            identity_path: session.identity_path.clone(),
            cache: Mutex::new(TimedCache::with_lifespan(session.cache_ttl_seconds)),
        }
    }

    /// Returns the verified current identity, fetching it through the
    /// gateway on a cache miss. An `Unauthorized` result propagates to the
    /// caller; the gateway has already handled the refresh attempt and the
    /// session-expired notification by then.
    pub async fn current_identity(&self) -> Result<Identity, GatewayError> {
        if let Some(identity) = self
            .cache
            .lock()
            .expect("session cache mutex poisoned")
            .cache_get(&())
        {
            debug!("Serving identity for '{}' from cache", identity.id);
            return Ok(identity.clone());
        }

        let identity: Identity = self
            .gateway
            .request(RequestDescriptor::get(self.identity_path.as_str()))
            .await?;

        self.cache
            .lock()
            .expect("session cache mutex poisoned")
            .cache_set((), identity.clone());
        Ok(identity)
    }

    /// Drops the cached identity. Called after logout or when a page decides
    /// an `Unauthorized` result means the cached identity is stale.
    pub fn invalidate(&self) {
        self.cache
            .lock()
            .expect("session cache mutex poisoned")
            .cache_remove(&());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::Server;

    use super::*;
    use crate::bus::NotificationBus;
    use crate::config::ApiConfig;
    use crate::project::ProjectSelector;
    use crate::storage::memory_backend::MemoryBackend;

    fn build_session_cache(base_url: &str) -> SessionCache {
        let api = ApiConfig {
            base_url: base_url.to_string(),
            timeout_in_ms: 2000,
        };
        let session = SessionConfig::default();
        let projects = ProjectSelector::new(Arc::new(MemoryBackend::new()));
        let bus = NotificationBus::new();
        let gateway = Gateway::new(&api, &session, projects, bus);
        SessionCache::new(gateway, &session)
    }

    /// Test that two identity reads within the TTL perform one gateway call.
    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/me")
            .with_status(200)
            .with_body(r#"{"result": true, "data": {"id": "u1", "name": "Dana"}}"#)
            .expect(1)
            .create_async()
            .await;

        let cache = build_session_cache(&server.url());
        let first = cache.current_identity().await.expect("first read");
        let second = cache.current_identity().await.expect("second read");
        m.assert_async().await;
        assert_eq!(first, second);
        assert_eq!(first.id, "u1");
    }

    /// Test that invalidate forces a refetch on the next read.
    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/me")
            .with_status(200)
            .with_body(r#"{"result": true, "data": {"id": "u1", "name": "Dana"}}"#)
            .expect(2)
            .create_async()
            .await;

        let cache = build_session_cache(&server.url());
        cache.current_identity().await.expect("first read");
        cache.invalidate();
        cache.current_identity().await.expect("read after invalidate");
        m.assert_async().await;
    }

    /// Test that an unauthenticated session propagates as Unauthorized and
    /// nothing is cached.
    #[tokio::test]
    async fn test_unauthorized_is_not_cached() {
        let mut server = Server::new_async().await;
        // Both the identity call and the coalesced refresh are rejected.
        let _identity = server
            .mock("GET", "/auth/me")
            .with_status(401)
            .create_async()
            .await;
        let _refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(401)
            .create_async()
            .await;

        let cache = build_session_cache(&server.url());
        let err = cache.current_identity().await.expect_err("should fail");
        assert!(err.is_unauthorized());
    }
}
