use crate::error::{BadEnvVarSnafu, ParseBoolSnafu, ParsePortSnafu, RegistrarResult};
use axum_login::tower_sessions::cookie::Key;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use snafu::ResultExt;
use std::sync::Arc;

pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    admin_credentials: Arc<AdminCredentials>,
    session_secret: Arc<SecretString>,
    enrollment_policy: EnrollmentPolicy,
    server_ip: Arc<str>,
}

impl RuntimeConfiguration {
    pub fn new() -> RegistrarResult<Self> {
        Self::from_vars(|name| dotenvy::var(name))
    }

    /// Builds the configuration out of any source of variables, erroring on the first missing one.
    pub fn from_vars(
        get_var: impl Fn(&'static str) -> Result<String, dotenvy::Error>,
    ) -> RegistrarResult<Self> {
        let get_env_var = |name: &'static str| get_var(name).context(BadEnvVarSnafu { name });
        let get_optional_var = |name: &'static str| get_var(name).ok().filter(|value| !value.is_empty());
        let get_flag = |name: &'static str, default: bool| -> RegistrarResult<bool> {
            match get_optional_var(name) {
                Some(value) => value.trim().parse::<bool>().context(ParseBoolSnafu { name }),
                None => Ok(default),
            }
        };

        Ok(Self {
            db_config: Arc::new(DbConfig {
                user: get_env_var("DB_USER")?,
                password: SecretString::from(get_env_var("DB_PASSWORD")?),
                host: get_env_var("DB_HOST")?,
                port: get_env_var("DB_PORT")?.parse().context(ParsePortSnafu)?,
                database: get_env_var("DB_NAME")?,
            }),
            admin_credentials: Arc::new(AdminCredentials::new(
                get_env_var("ADMIN_USERNAME")?,
                SecretString::from(get_env_var("ADMIN_PASSWORD")?),
            )),
            session_secret: Arc::new(SecretString::from(get_env_var("SECRET_KEY")?)),
            enrollment_policy: EnrollmentPolicy {
                allow_duplicate_contacts: get_flag("ENROLLMENT_ALLOW_DUPLICATE_CONTACTS", true)?,
                validate_contact_format: get_flag("ENROLLMENT_VALIDATE_CONTACT_FORMAT", false)?,
            },
            server_ip: get_optional_var("REGISTRAR_SERVER_IP")
                .unwrap_or_else(|| DEFAULT_SERVER_IP.to_string())
                .into(),
        })
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn admin_credentials(&self) -> Arc<AdminCredentials> {
        self.admin_credentials.clone()
    }

    pub const fn enrollment_policy(&self) -> EnrollmentPolicy {
        self.enrollment_policy
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    /// Cookie signing needs 64 bytes of key material, so the secret is stretched with SHA-512.
    pub fn session_key(&self) -> Key {
        let digest = Sha512::digest(self.session_secret.expose_secret().as_bytes());
        Key::from(digest.as_slice())
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    host: String,
    port: u16,
    database: String,
}

impl DbConfig {
    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database
        )
    }
}

#[derive(Debug)]
pub struct AdminCredentials {
    username: String,
    password: SecretString,
}

impl AdminCredentials {
    pub const fn new(username: String, password: SecretString) -> Self {
        Self { username, password }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    ///exact comparison of both values, no normalisation
    pub fn matches(&self, username: &str, password: &SecretString) -> bool {
        let username_matches = self.username == username;
        let password_matches = self.password.expose_secret() == password.expose_secret();
        username_matches && password_matches
    }

    /// Bytes stored against a logged-in session, so changing the password logs everybody out.
    pub fn session_auth_hash(&self) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update(self.username.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.password.expose_secret().as_bytes());
        hasher.finalize().to_vec()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnrollmentPolicy {
    pub allow_duplicate_contacts: bool,
    pub validate_contact_format: bool,
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self {
            allow_duplicate_contacts: true,
            validate_contact_format: false,
        }
    }
}
