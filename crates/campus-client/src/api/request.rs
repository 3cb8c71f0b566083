//! Request interceptor shared by every endpoint wrapper.
//!
//! Attaches the session's bearer token, normalizes the response and, on
//! failure, notifies the user. A 401 additionally ends the session. All of
//! this happens before the error reaches the caller.

use crate::config::Endpoints;
use crate::error::Result;
use crate::notify::Notifier;
use crate::session::SessionStore;
use bytes::Bytes;
use campus_http::{ApiError, ApiRequest, HttpClient, Normalized};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    endpoints: Arc<Endpoints>,
}

impl ApiClient {
    pub fn new(
        http: HttpClient,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            http,
            session,
            notifier,
            endpoints: Arc::new(endpoints),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Sends an authorized request and normalizes the envelope.
    pub async fn call(&self, request: ApiRequest) -> Result<Normalized> {
        let request = self.authorize(request);
        match self.http.request(request).await {
            Ok(normalized) => Ok(normalized),
            Err(err) => Err(self.intercept(err).into()),
        }
    }

    /// Like [`call`](Self::call), decoding the canonical payload into `T`.
    pub async fn call_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let normalized = self.call(request).await?;
        Ok(normalized.decode()?)
    }

    /// Raw body of a 2xx response; the envelope is not inspected.
    pub async fn call_bytes(&self, request: ApiRequest) -> Result<Bytes> {
        let request = self.authorize(request);
        match self.http.request_bytes(request).await {
            Ok(body) => Ok(body),
            Err(err) => Err(self.intercept(err).into()),
        }
    }

    fn authorize(&self, request: ApiRequest) -> ApiRequest {
        match self.session.token() {
            Some(token) => request.with_bearer(token),
            None => request,
        }
    }

    fn intercept(&self, err: ApiError) -> ApiError {
        let message = err.user_message();
        self.notifier.error(&message);

        if err.is_unauthorized() {
            warn!("[Interceptor] 401 received, ending session");
            self.session.logout();
        } else {
            debug!("[Interceptor] request rejected: {}", err);
        }
        err
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("http", &self.http)
            .field("logged_in", &self.session.is_logged_in())
            .finish_non_exhaustive()
    }
}
