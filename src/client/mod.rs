//! Authenticated API client
//!
//! Owns the session token lifecycle and issues every HTTP request the
//! dashboard makes: bearer authentication, the market-selector header read at
//! send time, proactive refresh of expired access tokens, a single-flight
//! refresh exchange shared by concurrent callers, and exactly one retry after
//! a 401 before the session is torn down.

pub mod envelope;

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{broadcast, Mutex};

use crate::config::Config;
use crate::error::{extract_error_message, ApiError, ApiResult};
use crate::market::{Market, MarketStore, MARKET_HEADER};
use crate::models::{RefreshRequest, RefreshedTokens};
use crate::session::{jwt, SessionStore};
use crate::storage::StateStore;

use envelope::Paginated;

/// Lifecycle notifications for the host application. The client never
/// navigates anywhere itself; on fatal auth failure it broadcasts
/// [`SessionEvent::Invalidated`] and the host decides what "go to login"
/// means in its world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Invalidated,
}

/// Refresh outcomes shared between single-flight waiters, so the error arm
/// has to be cloneable
#[derive(Debug, Clone)]
enum RefreshFailure {
    MissingRefreshToken,
    Rejected(String),
}

impl From<RefreshFailure> for ApiError {
    fn from(failure: RefreshFailure) -> Self {
        match failure {
            RefreshFailure::MissingRefreshToken => {
                ApiError::AuthFatal("no refresh token available".to_string())
            }
            RefreshFailure::Rejected(reason) => ApiError::AuthFatal(reason),
        }
    }
}

type SharedRefresh = Shared<BoxFuture<'static, Result<String, RefreshFailure>>>;

/// Authenticated HTTP client for the FXDesk backend
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    sessions: SessionStore,
    markets: MarketStore,
    /// Pending single-flight refresh; published under the lock before the
    /// exchange's first suspension point
    refresh_gate: Mutex<Option<SharedRefresh>>,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Build a client from configuration: opens the state store, rehydrates
    /// the persisted session and market selection
    pub fn new(config: &Config) -> ApiResult<Self> {
        let store = StateStore::open(&config.state_dir)?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let (events, _) = broadcast::channel(16);

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.api_base_url.trim_end_matches('/').to_string(),
                sessions: SessionStore::load(store.clone()),
                markets: MarketStore::load(store),
                refresh_gate: Mutex::new(None),
                events,
            }),
        })
    }

    /// Session accessors (current user, tokens, authenticated flag)
    pub fn session(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Currently selected market
    pub fn market(&self) -> Market {
        self.inner.markets.current()
    }

    /// Select the market carried on subsequent requests. Requests already in
    /// flight keep the value they were sent with.
    pub fn select_market(&self, market: Market) -> ApiResult<()> {
        self.inner.markets.select(market)
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    // ------------------------------------------------------------------
    // Typed request helpers
    // ------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.request(Method::GET, path, None, &[]).await?;
        envelope::decode_payload(body)
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiResult<T> {
        let body = self.request(Method::GET, path, None, query).await?;
        envelope::decode_payload(body)
    }

    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        requested_page: u32,
    ) -> ApiResult<Paginated<T>> {
        let body = self.request(Method::GET, path, None, query).await?;
        envelope::decode_list(body, requested_page)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(payload)?;
        let response = self.request(Method::POST, path, Some(body), &[]).await?;
        envelope::decode_payload(response)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(payload)?;
        let response = self.request(Method::PUT, path, Some(body), &[]).await?;
        envelope::decode_payload(response)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(payload)?;
        let response = self.request(Method::PATCH, path, Some(body), &[]).await?;
        envelope::decode_payload(response)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request(Method::DELETE, path, None, &[]).await?;
        Ok(())
    }

    /// One logical authenticated request with the retry-once policy
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
    ) -> ApiResult<Value> {
        self.request_with_headers(method, path, body, query, None)
            .await
    }

    /// Same as [`request`](Self::request) with caller-supplied headers.
    /// Caller headers are applied after the defaults, so they can override
    /// `Content-Type` or the market header but never remove them.
    pub async fn request_with_headers(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
        headers: Option<HeaderMap>,
    ) -> ApiResult<Value> {
        let inner = &self.inner;
        let mut token = ClientInner::valid_access_token(inner).await;
        let mut retried = false;

        loop {
            let response = inner
                .send(&method, path, body.as_ref(), query, headers.as_ref(), token.as_deref())
                .await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                if !retried {
                    retried = true;
                    tracing::debug!(path = path, "Request rejected with 401, refreshing session");
                    match ClientInner::refresh_access_token(inner).await {
                        Ok(fresh) => {
                            token = Some(fresh);
                            continue;
                        }
                        // The exchange already tore the session down
                        Err(failure) => return Err(failure.into()),
                    }
                }
                let reason = "session rejected after refresh";
                inner.invalidate_session(reason);
                return Err(ApiError::AuthFatal(reason.to_string()));
            }

            if !status.is_success() {
                let body = read_json_body(response).await;
                return Err(ApiError::Http {
                    status: status.as_u16(),
                    message: extract_error_message(&body),
                });
            }

            return Ok(read_json_body(response).await);
        }
    }

    /// Unauthenticated request without the retry policy. Used by the auth
    /// endpoints themselves: a 401 from `/auth/login` is a credential error,
    /// not an expired session.
    pub(crate) async fn execute_public(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        let response = self
            .inner
            .send(&method, path, body, &[], None, None)
            .await?;
        let status = response.status();
        let body = read_json_body(response).await;
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }
        Ok(body)
    }
}

impl ClientInner {
    /// Issue one HTTP attempt. The market header is resolved here so each
    /// attempt reflects the selection at its own send time.
    async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        query: &[(String, String)],
        extra_headers: Option<&HeaderMap>,
        token: Option<&str>,
    ) -> ApiResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(MARKET_HEADER, self.markets.current().as_str());

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(extra) = extra_headers {
            request = request.headers(extra.clone());
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Return an access token that is locally believed valid, refreshing if
    /// it looks expired. `None` means "send anonymously and let the server
    /// decide".
    async fn valid_access_token(inner: &Arc<Self>) -> Option<String> {
        match inner.sessions.access_token() {
            Some(token) if !jwt::is_expired(&token) => Some(token),
            _ => {
                if inner.sessions.refresh_token().is_none() {
                    inner.sessions.clear();
                    return None;
                }
                ClientInner::refresh_access_token(inner).await.ok()
            }
        }
    }

    /// Single-flight refresh: the first caller publishes a shared exchange
    /// future under the gate, everyone arriving before it settles awaits the
    /// same handle, and the handle is cleared once settled.
    async fn refresh_access_token(inner: &Arc<Self>) -> Result<String, RefreshFailure> {
        let shared = {
            let mut gate = inner.refresh_gate.lock().await;
            match gate.as_ref() {
                Some(pending) => pending.clone(),
                None => {
                    let owner = Arc::clone(inner);
                    let pending = async move { owner.exchange_refresh_token().await }
                        .boxed()
                        .shared();
                    *gate = Some(pending.clone());
                    pending
                }
            }
        };

        let outcome = shared.clone().await;

        // Clear only our own handle; a later refresh may already have
        // published a new one
        let mut gate = inner.refresh_gate.lock().await;
        if gate.as_ref().map_or(false, |pending| pending.ptr_eq(&shared)) {
            gate.take();
        }
        outcome
    }

    /// The actual network exchange of refresh token for access token.
    /// Any failure tears the session down and notifies the host.
    async fn exchange_refresh_token(&self) -> Result<String, RefreshFailure> {
        let refresh_token = match self.sessions.refresh_token() {
            Some(token) => token,
            None => {
                self.invalidate_session("refresh requested without a refresh token");
                return Err(RefreshFailure::MissingRefreshToken);
            }
        };

        tracing::debug!("Exchanging refresh token for a new access token");
        let body = match serde_json::to_value(RefreshRequest { refresh_token }) {
            Ok(body) => body,
            Err(e) => return Err(RefreshFailure::Rejected(e.to_string())),
        };

        let response = match self
            .send(&Method::POST, "/auth/refresh", Some(&body), &[], None, None)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.invalidate_session("refresh exchange failed to reach the server");
                return Err(RefreshFailure::Rejected(e.to_string()));
            }
        };

        let status = response.status();
        let payload = read_json_body(response).await;

        if !status.is_success() {
            let message = extract_error_message(&payload);
            self.invalidate_session("refresh token rejected");
            return Err(RefreshFailure::Rejected(format!(
                "refresh rejected ({}): {}",
                status.as_u16(),
                message
            )));
        }

        let tokens: RefreshedTokens =
            match serde_json::from_value(envelope::unwrap_data(payload)) {
                Ok(tokens) => tokens,
                Err(e) => {
                    self.invalidate_session("malformed refresh response");
                    return Err(RefreshFailure::Rejected(e.to_string()));
                }
            };

        let access_token = tokens.access_token.clone();
        if let Err(e) =
            self.sessions
                .apply_refresh(tokens.access_token, tokens.refresh_token, tokens.user)
        {
            // The in-memory session is already updated; a persist failure
            // only costs us the next restart
            tracing::warn!(error = %e, "Failed to persist refreshed session");
        }

        tracing::info!("Access token refreshed");
        Ok(access_token)
    }

    /// Tear the session down and notify subscribers. A request that was
    /// anonymous to begin with has nothing to tear down, so no event goes out.
    fn invalidate_session(&self, reason: &str) {
        if !self.sessions.is_authenticated() {
            return;
        }
        tracing::warn!(reason = reason, "Session invalidated");
        self.sessions.clear();
        let _ = self.events.send(SessionEvent::Invalidated);
    }
}

/// Read a response body as JSON; empty or unparseable bodies read as `Null`
async fn read_json_body(response: reqwest::Response) -> Value {
    match response.text().await {
        Ok(text) if !text.is_empty() => serde_json::from_str(&text).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
