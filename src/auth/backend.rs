use crate::{config::AdminCredentials, error::RegistrarError};
use async_trait::async_trait;
use axum_login::{AuthUser, AuthnBackend, UserId};
use secrecy::SecretString;
use std::sync::Arc;

/// Single-administrator backend: the only account is the one from the configuration.
#[derive(Clone, Debug)]
pub struct RegistrarAuthBackend {
    credentials: Arc<AdminCredentials>,
}

impl RegistrarAuthBackend {
    pub const fn new(credentials: Arc<AdminCredentials>) -> Self {
        Self { credentials }
    }

    fn administrator(&self) -> Administrator {
        Administrator {
            username: self.credentials.username().into(),
            auth_hash: self.credentials.session_auth_hash().into(),
        }
    }
}

pub struct LoginAttempt {
    pub username: String,
    pub password: SecretString,
}

#[derive(Clone, Debug)]
pub struct Administrator {
    pub username: Arc<str>,
    auth_hash: Arc<[u8]>,
}

impl AuthUser for Administrator {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.username.to_string()
    }

    fn session_auth_hash(&self) -> &[u8] {
        &self.auth_hash
    }
}

#[async_trait]
impl AuthnBackend for RegistrarAuthBackend {
    type User = Administrator;
    type Credentials = LoginAttempt;
    type Error = RegistrarError;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        let LoginAttempt { username, password } = creds;

        Ok(if self.credentials.matches(&username, &password) {
            Some(self.administrator())
        } else {
            warn!(?username, "Failed admin login");
            None
        })
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        Ok((user_id == self.credentials.username()).then(|| self.administrator()))
    }
}
