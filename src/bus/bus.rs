//! The notification bus decouples "a condition needs user attention" from
//! "how it is rendered". The request gateway publishes here when a session
//! cannot be recovered; the dialog host subscribes and renders a blocking
//! modal. The bus itself never renders anything.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::debug;

/// An action attached to a dialog button.
pub type DialogAction = Arc<dyn Fn() + Send + Sync>;

/// Payload of a `Show` event: display text plus optional confirm/cancel
/// actions supplied by the publisher.
#[derive(Clone, Default)]
pub struct DialogRequest {
    pub message: String,
    pub on_confirm: Option<DialogAction>,
    pub on_cancel: Option<DialogAction>,
}

impl DialogRequest {
    pub fn message(message: impl Into<String>) -> Self {
        DialogRequest {
            message: message.into(),
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl fmt::Debug for DialogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogRequest")
            .field("message", &self.message)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// A notification event. Transient: never persisted, never queued.
#[derive(Clone, Debug)]
pub enum NotificationEvent {
    Show(DialogRequest),
    Hide,
}

type Listener = Arc<dyn Fn(&NotificationEvent) + Send + Sync>;

struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Publish/subscribe channel with synchronous fan-out in registration order.
///
/// Events published while no listener is mounted are dropped, not queued; the
/// dialog host is expected to subscribe early in the application lifecycle.
#[derive(Clone)]
pub struct NotificationBus {
    inner: Arc<Mutex<BusInner>>,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationBus {
    pub fn new() -> Self {
        NotificationBus {
            inner: Arc::new(Mutex::new(BusInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Registers a listener and returns a subscription handle used to
    /// unsubscribe. Multiple concurrent subscribers are allowed; the typical
    /// steady state is exactly one.
    pub fn subscribe(&self, listener: impl Fn(&NotificationEvent) + Send + Sync + 'static) -> Subscription {
        let mut inner = self.inner.lock().expect("notification bus mutex poisoned");
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription {
            bus: self.inner.clone(),
            id,
        }
    }

    /// Delivers the event synchronously to every current subscriber.
    pub fn publish(&self, event: &NotificationEvent) {
        let listeners: Vec<Listener> = {
            let inner = self.inner.lock().expect("notification bus mutex poisoned");
            inner
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect()
        };

        if listeners.is_empty() {
            debug!("Notification event published with no listeners mounted; dropping.");
            return;
        }

        // Fan out without holding the lock so listeners may subscribe or
        // unsubscribe from within their callback.
        for listener in listeners {
            listener(event);
        }
    }
}

/// Handle returned by `subscribe`; detaches the listener when consumed.
pub struct Subscription {
    bus: Arc<Mutex<BusInner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        let mut inner = self.bus.lock().expect("notification bus mutex poisoned");
        inner.listeners.retain(|(id, _)| *id != self.id);
    }
}
