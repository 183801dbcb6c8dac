//! The request gateway: the single chokepoint for all outbound backend calls.
//!
//! Every domain service funnels through `Gateway::request`. The gateway
//! attaches the project-scope header, relies on the HTTP client's cookie jar
//! for ambient auth, classifies failures into `GatewayError`, and coordinates
//! the shared token-refresh round trip on 401.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use http::{HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::descriptor::RequestDescriptor;
use super::error::{GatewayError, RefreshError, GENERIC_ERROR_MESSAGE};
use crate::bus::{DialogRequest, NotificationBus, NotificationEvent};
use crate::config::{ApiConfig, SessionConfig};
use crate::models::{ApiEnvelope, ApiErrorBody};
use crate::project::ProjectSelector;

/// The request header identifying which project's data a call operates on.
pub const PROJECT_SCOPE_HEADER: &str = "x-project-id";

/// Display text of the blocking dialog shown when a session cannot be
/// recovered.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

type RefreshHandle = Shared<BoxFuture<'static, Result<(), RefreshError>>>;

/// The only component permitted to perform network calls to the backend.
///
/// Cloning is cheap and clones share the HTTP connection pool, the cookie jar
/// and the in-flight refresh slot.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    refresh_url: String,
    projects: ProjectSelector,
    bus: NotificationBus,
    refresh_slot: Arc<Mutex<Option<RefreshHandle>>>,
}

impl Gateway {
    /// Builds the gateway and its HTTP client. The cookie store is enabled so
    /// the `access_token` / `refresh_token` cookies ride along implicitly;
    /// application code never reads or writes them.
    pub fn new(
        api: &ApiConfig,
        session: &SessionConfig,
        projects: ProjectSelector,
        bus: NotificationBus,
    ) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_millis(api.timeout_in_ms))
            .build()
            .expect("Could not build HTTP client");

        let base_url = api.base_url.trim_end_matches('/').to_string();
        let refresh_url = format!("{}{}", base_url, session.refresh_path);

        Gateway {
            http,
            base_url,
            refresh_url,
            projects,
            bus,
            refresh_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Executes one backend call and unwraps the response envelope.
    ///
    /// A 401 triggers exactly one coalesced refresh attempt shared by all
    /// concurrent callers, then a single retry of the original request. On
    /// refresh failure a session-expired event is published on the bus and
    /// the call resolves `Unauthorized`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, GatewayError> {
        let response = self.dispatch(&descriptor).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::deserialize_response(response).await;
        }

        debug!(
            "Request to '{}' returned 401; attempting session refresh",
            descriptor.path
        );
        if self.refresh_session().await.is_err() {
            return Err(GatewayError::Unauthorized);
        }

        let retried = self.dispatch(&descriptor).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            // The refresh succeeded but the retry was still rejected; give up
            // instead of looping.
            warn!(
                "Request to '{}' still unauthorized after refresh",
                descriptor.path
            );
            return Err(GatewayError::Unauthorized);
        }
        Self::deserialize_response(retried).await
    }

    /// Builds and sends the HTTP request, injecting the project-scope header
    /// when a project is selected and the caller did not set it.
    async fn dispatch(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = format!("{}{}", self.base_url, descriptor.path);

        let mut headers = descriptor.headers.clone();
        if !headers.contains_key(PROJECT_SCOPE_HEADER) {
            if let Some(project_id) = self.projects.get() {
                match HeaderValue::from_str(&project_id) {
                    Ok(value) => {
                        headers.insert(PROJECT_SCOPE_HEADER, value);
                    }
                    Err(_) => {
                        warn!(
                            "Selected project id is not a valid header value; sending unscoped request"
                        );
                    }
                }
            }
        }

        let mut request = self
            .http
            .request(descriptor.method.clone(), &url)
            .headers(headers);
        if !descriptor.query.is_empty() {
            request = request.query(&descriptor.query);
        }
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    /// Classifies a received response and unwraps the envelope on success.
    async fn deserialize_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| GatewayError::Network(e.to_string()))?;
            let envelope: ApiEnvelope<T> =
                serde_json::from_slice(&bytes).map_err(|e| GatewayError::Server {
                    status: status.as_u16(),
                    message: format!("malformed response envelope: {}", e),
                })?;
            if !envelope.result {
                return Err(GatewayError::Client {
                    status: status.as_u16(),
                    code: None,
                    message: GENERIC_ERROR_MESSAGE.to_string(),
                });
            }
            return Ok(envelope.data);
        }

        if status.is_client_error() {
            let body: ApiErrorBody = response.json().await.unwrap_or_default();
            return Err(GatewayError::Client {
                status: status.as_u16(),
                code: body.code,
                message: body
                    .message
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            });
        }

        let message = response.text().await.unwrap_or_default();
        Err(GatewayError::Server {
            status: status.as_u16(),
            message: if message.is_empty() {
                GENERIC_ERROR_MESSAGE.to_string()
            } else {
                message
            },
        })
    }

    /// Runs the token refresh, coalescing concurrent callers onto a single
    /// in-flight round trip. The slot is checked-and-set under the lock, so
    /// at most one refresh future exists at a time; it is cleared once the
    /// shared handle has resolved.
    async fn refresh_session(&self) -> Result<(), RefreshError> {
        let handle = {
            let mut slot = self.refresh_slot.lock().expect("refresh slot mutex poisoned");
            match slot.as_ref() {
                // A handle that has already resolved belongs to a previous
                // refresh round; joining it would hand this caller a stale
                // outcome without a real round trip.
                Some(handle) if handle.peek().is_none() => {
                    debug!("Joining in-flight session refresh");
                    handle.clone()
                }
                _ => {
                    let handle = Self::run_refresh(
                        self.http.clone(),
                        self.refresh_url.clone(),
                        self.bus.clone(),
                    )
                    .boxed()
                    .shared();
                    *slot = Some(handle.clone());
                    handle
                }
            }
        };

        let outcome = handle.clone().await;

        let mut slot = self.refresh_slot.lock().expect("refresh slot mutex poisoned");
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&handle)) {
            *slot = None;
        }
        outcome
    }

    /// The single shared refresh round trip. On failure the session-expired
    /// dialog event is published here, exactly once per refresh, regardless
    /// of how many callers were coalesced onto it.
    async fn run_refresh(
        http: reqwest::Client,
        refresh_url: String,
        bus: NotificationBus,
    ) -> Result<(), RefreshError> {
        debug!("Refreshing session via {}", refresh_url);
        let response = match http.post(&refresh_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Session refresh transport failure: {}", e);
                Self::publish_session_expired(&bus);
                return Err(RefreshError::Transport(e.to_string()));
            }
        };

        if response.status().is_success() {
            info!("Session refresh succeeded");
            Ok(())
        } else {
            let status = response.status().as_u16();
            warn!("Session refresh rejected with status {}", status);
            Self::publish_session_expired(&bus);
            Err(RefreshError::Rejected(status))
        }
    }

    fn publish_session_expired(bus: &NotificationBus) {
        // The dialog host owns the redirect back to login, so the event
        // carries no actions of its own.
        bus.publish(&NotificationEvent::Show(DialogRequest::message(
            SESSION_EXPIRED_MESSAGE,
        )));
    }
}
