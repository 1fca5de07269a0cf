use crate::{
    auth::backend::{Administrator, LoginAttempt, RegistrarAuthBackend},
    error::RegistrarResult,
};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_login::{AuthSession, tower_sessions::Session};
use secrecy::SecretString;

pub mod backend;
pub mod postgres_store;

/// The login state plus the raw session it lives in, which also carries flash messages.
pub struct RegistrarSession {
    pub auth: AuthSession<RegistrarAuthBackend>,
    pub session: Session,
}

impl<S: Send + Sync> FromRequestParts<S> for RegistrarSession {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthSession::<RegistrarAuthBackend>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(Self { auth, session })
    }
}

pub const LOGIN_PATH: &str = "/admin/login";

pub fn is_authenticated(session: &RegistrarSession) -> bool {
    session.auth.user.is_some()
}

///true iff both values match the configured admin exactly, in which case the session is now logged in
pub async fn log_in(
    session: &mut RegistrarSession,
    username: String,
    password: SecretString,
) -> RegistrarResult<bool> {
    let Some(admin) = session
        .auth
        .authenticate(LoginAttempt { username, password })
        .await?
    else {
        return Ok(false);
    };

    session.auth.login(&admin).await?;
    info!(username = ?admin.username, "Admin logged in");
    Ok(true)
}

pub async fn log_out(session: &mut RegistrarSession) {
    match session.auth.logout().await {
        Ok(Some(admin)) => info!(username = ?admin.username, "Admin logged out"),
        Ok(None) => {}
        Err(e) => warn!(?e, "Error clearing admin session"),
    }
}

/// Proof that the request belongs to a logged-in administrator.
///
/// Admin handlers take this as an argument, so an anonymous request is turned away with a
/// redirect to the login page before the handler body (and the data layer) ever runs.
pub struct AuthenticatedAdmin {
    pub session: RegistrarSession,
    pub admin: Administrator,
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedAdmin {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = RegistrarSession::from_request_parts(parts, state).await?;

        match session.auth.user.clone() {
            Some(admin) => Ok(Self { session, admin }),
            None => {
                debug!(uri = %parts.uri, "Unauthenticated request for admin route");
                Err(Redirect::to(LOGIN_PATH).into_response())
            }
        }
    }
}
