//! Shared application state.
//!
//! Contains the session-layer services shared by every page: configuration,
//! the request gateway, the notification bus, the project selector, the
//! pending-invite store, the session cache and the route guard.

use std::sync::Arc;

use crate::bus::NotificationBus;
use crate::config::ConfigV1;
use crate::gateway::Gateway;
use crate::guard::RouteGuard;
use crate::invite::PendingInviteStore;
use crate::project::ProjectSelector;
use crate::session::SessionCache;

/// Application state cloned into every page and service wrapper.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The single chokepoint for outbound backend calls.
    pub gateway: Gateway,
    /// Channel between the request pipeline and the dialog host.
    pub bus: NotificationBus,
    /// The process-wide selected-project register.
    pub projects: ProjectSelector,
    /// Deferred invitation token, bridging the external identity flow.
    pub invites: PendingInviteStore,
    /// TTL-cached verified identity.
    pub session: Arc<SessionCache>,
    /// Coarse pre-render gate for protected routes.
    pub guard: Arc<RouteGuard>,
}
