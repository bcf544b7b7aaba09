//! Sign-in, registration and session lifecycle endpoints.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use rowing_shop_core::Email;

use super::{ApiClient, PendingRequest, decode, paths};
use crate::error::{ApiError, Result};
use crate::models::UserProfile;

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The server issued tokens and the new user is now signed in.
    SignedIn(UserProfile),
    /// The account exists but the user still has to log in.
    Created,
}

/// Body of `POST /auth/login`.
#[derive(Deserialize)]
struct TokenPair {
    access_token: String,
    refresh_token: String,
}

/// Body of `POST /auth/register`; tokens are optional.
#[derive(Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Body of `POST /auth/refresh`.
#[derive(Deserialize)]
pub(super) struct AccessTokenResponse {
    pub(super) access_token: String,
}

/// Body of `POST /auth/register`, also used by administrators adding users.
#[derive(Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Serialize)]
struct ChangePasswordRequest<'a> {
    current: &'a str,
    new: &'a str,
}

impl ApiClient {
    /// Sign in with email and password.
    ///
    /// The profile is fetched with the new access token before anything is
    /// stored, so the session either holds tokens and profile together or is
    /// left as it was.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` with the server's detail (for example
    /// "Incorrect email or password") when the credentials are rejected.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<UserProfile> {
        let request = PendingRequest::post(paths::LOGIN).form(vec![
            ("username", SecretString::from(email.as_str())),
            ("password", password.clone()),
        ]);
        let body = self.dispatch(&request, None).await?.into_result()?;
        let tokens: TokenPair = decode(&body)?;

        let access_token = SecretString::from(tokens.access_token);
        let user = self.profile_with(&access_token).await?;

        self.session().login(
            access_token,
            SecretString::from(tokens.refresh_token),
            user.clone(),
        );
        info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// Create an account.
    ///
    /// If the server answers with both tokens the user is signed in as with
    /// [`ApiClient::login`]; otherwise the session is not touched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` when the server refuses the account (for
    /// example "Email already registered").
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(&self, email: &Email, password: &SecretString) -> Result<Registration> {
        let request = PendingRequest::post(paths::REGISTER).json(&RegisterRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        })?;
        let body = self.dispatch(&request, None).await?.into_result()?;
        let response: RegisterResponse = decode(&body)?;

        let (Some(access_token), Some(refresh_token)) =
            (response.access_token, response.refresh_token)
        else {
            info!("account created");
            return Ok(Registration::Created);
        };

        let access_token = SecretString::from(access_token);
        let user = self.profile_with(&access_token).await?;
        self.session()
            .login(access_token, SecretString::from(refresh_token), user.clone());
        info!(user_id = %user.id, "account created and signed in");
        Ok(Registration::SignedIn(user))
    }

    /// Sign out.
    ///
    /// Tells the server when an access token is held, then clears the session
    /// whatever the server said.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if self.session().access_token().is_some() {
            let request = PendingRequest::post(paths::LOGOUT).authorized();
            if let Err(err) = self.call_ignoring_body(&request).await {
                warn!(error = %err, "server-side logout failed");
            }
        }
        self.session().clear();
        info!("signed out");
    }

    /// Change the signed-in user's password.
    ///
    /// The server revokes the current tokens on success; callers sign in
    /// again with the new password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` when the current password is wrong or the
    /// new one is refused.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<()> {
        let request = PendingRequest::post(paths::CHANGE_PASSWORD)
            .authorized()
            .json(&ChangePasswordRequest {
                current: current.expose_secret(),
                new: new.expose_secret(),
            })?;
        self.call_ignoring_body(&request).await
    }

    /// Fetch the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SessionExpired` if the session can no longer be
    /// refreshed.
    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        self.call(&PendingRequest::get(paths::PROFILE).authorized())
            .await
    }

    /// Resume a session from persisted tokens.
    ///
    /// Stores the tokens, then loads the profile (refreshing once if the
    /// access token has gone stale). On any failure the session is cleared.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented loading the profile.
    #[instrument(skip_all)]
    pub async fn restore_session(
        &self,
        access_token: SecretString,
        refresh_token: SecretString,
    ) -> Result<UserProfile> {
        self.session().restore_tokens(access_token, refresh_token);

        let user = match self.fetch_profile().await {
            Ok(user) => user,
            Err(err) => {
                self.session().clear();
                return Err(err);
            }
        };

        let current = self.session().snapshot();
        let (Some(access_token), Some(refresh_token)) = (current.access_token, current.refresh_token)
        else {
            self.session().clear();
            return Err(ApiError::SessionExpired);
        };
        self.session().login(access_token, refresh_token, user.clone());
        info!(user_id = %user.id, "session restored");
        Ok(user)
    }

    /// `GET /users/me` with an explicit token, bypassing the session store.
    async fn profile_with(&self, access_token: &SecretString) -> Result<UserProfile> {
        let request = PendingRequest::get(paths::PROFILE);
        let body = self
            .dispatch(&request, Some(access_token))
            .await?
            .into_result()?;
        decode(&body)
    }
}
