//! Authenticated client for the Rowing Shop REST API.
//!
//! # Request lifecycle
//!
//! ```text
//! IDLE -> AWAITING_RESPONSE -> SUCCESS
//!                           -> non-401 error (terminal)
//!                           -> 401 -> AWAITING_REFRESH -> REFRESHED -> RETRYING -> SUCCESS | error (terminal)
//!                                                      -> REFRESH_FAILED -> session cleared, SessionExpired
//! ```
//!
//! - Protected calls carry `Authorization: Bearer <access token>` when a token is stored.
//! - A 401 on a protected call triggers one refresh with the stored refresh
//!   token, then exactly one retry. The retry's outcome is final, including a
//!   second 401.
//! - Retry state belongs to the call, not the client: concurrent calls that
//!   hit a 401 together each refresh on their own, and the last refreshed
//!   token written to the store wins.
//! - Unprotected calls never refresh; a 401 there is an ordinary error.
//!
//! Endpoint wrappers live in the submodules, grouped the way the API groups
//! its routes.

mod auth;
mod catalog;
mod contact;
mod orders;
mod users;

pub use auth::Registration;

use std::fmt;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::SessionStore;

/// How many times a call may be re-sent after refreshing its access token.
const MAX_AUTH_RETRIES: u8 = 1;

/// Endpoint paths, relative to the configured API base URL.
pub mod paths {
    use rowing_shop_core::{ProductId, UserId};

    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
    pub const REFRESH: &str = "/auth/refresh";
    pub const LOGOUT: &str = "/auth/logout";
    pub const CHANGE_PASSWORD: &str = "/auth/change-password";
    pub const PROFILE: &str = "/users/me";
    pub const ALL_USERS: &str = "/users/all-users";
    pub const PRODUCTS: &str = "/products";
    pub const PLACE_ORDER: &str = "/orders/place-order";
    pub const CONTACT: &str = "/contact/";

    #[must_use]
    pub fn user(id: UserId) -> String {
        format!("/users/{id}")
    }

    #[must_use]
    pub fn product(id: ProductId) -> String {
        format!("/products/{id}")
    }

    #[must_use]
    pub fn user_orders(id: UserId) -> String {
        format!("/orders/user/{id}")
    }
}

/// Body of a pending request.
#[derive(Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(&'static str, SecretString)>),
    /// `text/plain` body.
    Text(SecretString),
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(_) => f.write_str("Json(..)"),
            Self::Form(fields) => f
                .debug_list()
                .entries(fields.iter().map(|(name, _)| name))
                .finish(),
            Self::Text(_) => f.write_str("Text([REDACTED])"),
        }
    }
}

/// Description of one outbound call, kept just long enough to re-send it
/// once after a token refresh.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    method: Method,
    path: String,
    body: RequestBody,
    requires_auth: bool,
}

impl PendingRequest {
    /// A request with no body and no authorization.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            requires_auth: false,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach the stored access token and take part in refresh-and-retry.
    #[must_use]
    pub const fn authorized(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Send `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Serde` if `body` can not be represented as JSON.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Send URL-encoded form fields.
    #[must_use]
    pub fn form(mut self, fields: Vec<(&'static str, SecretString)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    /// Send a plain-text body.
    #[must_use]
    pub fn text(mut self, body: SecretString) -> Self {
        self.body = RequestBody::Text(body);
        self
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }
}

/// Status and body of a completed exchange.
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl RawResponse {
    fn into_result(self) -> Result<Vec<u8>> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(ApiError::from_response(self.status, &self.body))
        }
    }
}

/// Rowing Shop API client.
///
/// Cheap to clone; clones share the HTTP connection pool and session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client that reads and writes credentials through `session`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client can not be built.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                config,
                session,
            }),
        })
    }

    /// The session store this client reads tokens from.
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Perform a call and decode its JSON response.
    ///
    /// # Errors
    ///
    /// - `ApiError::SessionExpired` if a 401 could not be recovered by refreshing
    /// - `ApiError::Remote` for any other non-success status (including a 401 on retry)
    /// - `ApiError::Network` on transport failure
    /// - `ApiError::Serde` if the response body does not decode as `T`
    pub async fn call<T: DeserializeOwned>(&self, request: &PendingRequest) -> Result<T> {
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Perform a call whose response body is not needed.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`], minus decoding.
    pub async fn call_ignoring_body(&self, request: &PendingRequest) -> Result<()> {
        self.execute(request).await.map(drop)
    }

    /// Fail with `AdminRequired` unless the signed-in user is an administrator.
    fn ensure_admin(&self) -> Result<()> {
        if self.inner.session.is_admin() {
            Ok(())
        } else {
            Err(ApiError::AdminRequired)
        }
    }

    /// Run the request lifecycle for one call and return the success body.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: &PendingRequest) -> Result<Vec<u8>> {
        let mut retries: u8 = 0;
        loop {
            let token = if request.requires_auth {
                self.inner.session.access_token()
            } else {
                None
            };
            let response = self.dispatch(request, token.as_ref()).await?;

            let may_refresh = request.requires_auth
                && response.status == StatusCode::UNAUTHORIZED
                && retries < MAX_AUTH_RETRIES;
            if !may_refresh {
                return response.into_result();
            }

            retries += 1;
            debug!("access token rejected; refreshing before retry");
            self.refresh_session().await?;
        }
    }

    /// Send one HTTP request. No retry, no session writes.
    async fn dispatch(
        &self,
        request: &PendingRequest,
        access_token: Option<&SecretString>,
    ) -> Result<RawResponse> {
        let url = self.inner.config.endpoint(&request.path);
        let mut builder = self.inner.http.request(request.method.clone(), url);

        if let Some(token) = access_token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => {
                let exposed: Vec<(&str, &str)> = fields
                    .iter()
                    .map(|(name, value)| (*name, value.expose_secret()))
                    .collect();
                builder.form(&exposed)
            }
            RequestBody::Text(text) => builder
                .header(CONTENT_TYPE, "text/plain")
                .body(text.expose_secret().to_owned()),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(%status, "response received");

        Ok(RawResponse { status, body })
    }

    /// Obtain a new access token with the stored refresh token.
    ///
    /// On any failure the session is cleared and `SessionExpired` returned.
    #[instrument(skip(self))]
    async fn refresh_session(&self) -> Result<()> {
        let Some(refresh_token) = self.inner.session.refresh_token() else {
            warn!("no refresh token stored; ending session");
            self.inner.session.clear();
            return Err(ApiError::SessionExpired);
        };

        match self.request_access_token(&refresh_token).await {
            Ok(access_token) => {
                self.inner.session.update_access_token(access_token);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed; ending session");
                self.inner.session.clear();
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn request_access_token(&self, refresh_token: &SecretString) -> Result<SecretString> {
        let request = PendingRequest::post(paths::REFRESH).text(refresh_token.clone());
        let body = self.dispatch(&request, None).await?.into_result()?;
        let refreshed: auth::AccessTokenResponse = decode(&body)?;
        Ok(SecretString::from(refreshed.access_token))
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base_url", &self.inner.config.api_base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Decode a JSON body; an empty body decodes as `null`.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    Ok(serde_json::from_slice(body)?)
}
