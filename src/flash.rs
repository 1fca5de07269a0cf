use crate::error::{RegistrarResult, TowerSessionSnafu};
use axum_login::tower_sessions::Session;
use snafu::ResultExt;

const FLASH_KEY: &str = "registrar.flash";

/// Queues a message for whichever page this browser renders next.
pub async fn push(session: &Session, message: impl Into<String>) -> RegistrarResult<()> {
    let mut messages: Vec<String> = session
        .get(FLASH_KEY)
        .await
        .context(TowerSessionSnafu)?
        .unwrap_or_default();
    messages.push(message.into());

    session
        .insert(FLASH_KEY, messages)
        .await
        .context(TowerSessionSnafu)
}

/// Removes and returns every queued message, oldest first.
pub async fn take(session: &Session) -> RegistrarResult<Vec<String>> {
    Ok(session
        .remove::<Vec<String>>(FLASH_KEY)
        .await
        .context(TowerSessionSnafu)?
        .unwrap_or_default())
}
