//! Application startup: assembles the session layer from configuration.
//!
//! Builds the storage backend, the registers on top of it, the notification
//! bus, the request gateway and the session cache, wired together exactly
//! once. The dialog host should subscribe to the bus immediately after this
//! returns, before any page issues a request.

use std::sync::Arc;

use tracing::info;

use crate::bus::NotificationBus;
use crate::config::ConfigV1;
use crate::gateway::Gateway;
use crate::guard::RouteGuard;
use crate::invite::PendingInviteStore;
use crate::project::ProjectSelector;
use crate::session::SessionCache;
use crate::state::AppState;
use crate::storage::create_backend;

/// Builds the shared application state from a loaded configuration.
pub fn build_state(config: Arc<ConfigV1>) -> AppState {
    info!("Assembling session layer against '{}'", config.api.base_url);

    let backend = create_backend(&config.storage);
    let projects = ProjectSelector::new(backend.clone());
    let invites = PendingInviteStore::new(backend);
    let bus = NotificationBus::new();

    let gateway = Gateway::new(&config.api, &config.session, projects.clone(), bus.clone());
    let session = Arc::new(SessionCache::new(gateway.clone(), &config.session));
    let guard = Arc::new(RouteGuard::new(&config.guard, &config.session));

    AppState {
        config,
        gateway,
        bus,
        projects,
        invites,
        session,
        guard,
    }
}
