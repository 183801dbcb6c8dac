//! The pending-invite store.
//!
//! Bridges an invitation token across the redirect round trip through the
//! external identity flow: saved when an unauthenticated user follows an
//! invite link, redeemed after authentication completes.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::gateway::{Gateway, GatewayError, RequestDescriptor};
use crate::storage::StorageBackend;

/// Storage key for the deferred invitation token.
pub const INVITE_TOKEN_KEY: &str = "tg_invite_token";

/// Persisted single-value store for a deferred invitation token.
///
/// At most one token is pending at a time; a new save overwrites the previous
/// value. All operations are best-effort: a persistence failure degrades to
/// "absent" and the invite flow prompts the user to re-enter the token.
#[derive(Clone)]
pub struct PendingInviteStore {
    backend: Arc<dyn StorageBackend>,
}

impl PendingInviteStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        PendingInviteStore { backend }
    }

    pub fn save(&self, token: &str) {
        debug!("Saving pending invite token");
        if let Err(e) = self.backend.set(INVITE_TOKEN_KEY, token) {
            warn!("Failed to persist pending invite token: {}", e);
        }
    }

    pub fn read(&self) -> Option<String> {
        match self.backend.get(INVITE_TOKEN_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read pending invite token: {}", e);
                None
            }
        }
    }

    /// Clears the pending token. Idempotent: clearing twice is a no-op the
    /// second time and never raises.
    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(INVITE_TOKEN_KEY) {
            warn!("Failed to clear pending invite token: {}", e);
        }
    }
}

/// Completes a deferred invite after authentication: reads the pending token,
/// posts the acceptance call through the gateway, and clears the token only
/// once the backend has accepted it. Returns whether a token was redeemed.
pub async fn redeem_pending_invite(
    gateway: &Gateway,
    invites: &PendingInviteStore,
    invite_accept_path: &str,
) -> Result<bool, GatewayError> {
    let token = match invites.read() {
        Some(token) => token,
        None => return Ok(false),
    };

    let descriptor =
        RequestDescriptor::post(invite_accept_path).with_body(json!({ "token": token }));
    gateway.request::<serde_json::Value>(descriptor).await?;

    info!("Pending invite accepted; clearing stored token.");
    invites.clear();
    Ok(true)
}
