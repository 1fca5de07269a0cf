use crate::auth::backend::RegistrarAuthBackend;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::{num::ParseIntError, str::ParseBoolError};

pub type RegistrarResult<T> = Result<T, RegistrarError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistrarError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error commiting SQL transaction"))]
    CommitTransaction { source: sqlx::Error },
    #[snafu(display("Error rolling back SQL transaction after failed query: {}", query))]
    RollbackTransaction {
        source: sqlx::Error,
        query: sqlx::Error,
    },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Error serialising with rmp_serde"))]
    RmpSerdeEncode { source: rmp_serde::encode::Error },
    #[snafu(display("Error deserialising with rmp_serde"))]
    RmpSerdeDecode { source: rmp_serde::decode::Error },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse `{}` as a boolean", name))]
    ParseBool {
        source: ParseBoolError,
        name: &'static str,
    },
    #[snafu(display("The {} field is required", field.replace('_', " ")))]
    MissingField { field: &'static str },
    #[snafu(display("{:?} is not a valid email address", email))]
    InvalidEmail {
        source: email_address::Error,
        email: String,
    },
    #[snafu(display("{:?} is not a valid phone number", phone))]
    InvalidPhone { phone: String },
    #[snafu(display("A student with this email address or phone number is already enrolled"))]
    DuplicateContact,
    #[snafu(display("Unable to find student with ID: {}", id))]
    MissingStudent { id: i32 },
    #[snafu(display("Error with sessions"))]
    TowerSession {
        source: axum_login::tower_sessions::session::Error,
    },
}

impl RegistrarError {
    /// Whether this error came from bad form input rather than the server.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidEmail { .. }
                | Self::InvalidPhone { .. }
                | Self::DuplicateContact
        )
    }
}

impl From<axum_login::Error<RegistrarAuthBackend>> for RegistrarError {
    fn from(value: axum_login::Error<RegistrarAuthBackend>) -> Self {
        match value {
            axum_login::Error::Session(source) => Self::TowerSession { source },
            axum_login::Error::Backend(backend) => backend,
        }
    }
}

impl IntoResponse for RegistrarError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Registrar Error"}
                    br;
                    span {(desc)}
                    br;
                    a href="/" class="underline" {"Back to home"}
                }
            }
        };

        let status_code = match &self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MigrateError { .. } => ISE,
            Self::MakeQuery { source } => match source {
                sqlx::Error::RowNotFound => NF,
                _ => ISE,
            },
            Self::CommitTransaction { .. } | Self::RollbackTransaction { .. } => ISE,
            Self::RmpSerdeEncode { .. } | Self::RmpSerdeDecode { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } | Self::ParseBool { .. } => ISE,
            Self::MissingField { .. } => BI,
            Self::InvalidEmail { .. } | Self::InvalidPhone { .. } => BI,
            Self::DuplicateContact => BI,
            Self::MissingStudent { .. } => NF,
            Self::TowerSession { .. } => ISE,
        };

        if status_code == NF {
            debug!(?self, "Not found");
        } else {
            error!(?self, "Error!");
        }
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
