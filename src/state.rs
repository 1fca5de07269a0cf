use crate::{
    auth::{RegistrarSession, is_authenticated},
    config::RuntimeConfiguration,
    data::StudentStore,
    error::{MigrateSnafu, OpenDatabaseSnafu, RegistrarResult},
    flash,
    maud_conveniences::{render_flashes, render_nav},
};
use maud::{DOCTYPE, Markup, html};
use snafu::ResultExt;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::sync::Arc;

pub async fn open_database(
    options: PgPoolOptions,
    config: &RuntimeConfiguration,
) -> RegistrarResult<Pool<Postgres>> {
    let pool = options
        .connect(&config.db_config().get_db_path())
        .await
        .context(OpenDatabaseSnafu)?;

    sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

    Ok(pool)
}

#[derive(Clone, Debug)]
pub struct RegistrarState {
    students: Arc<dyn StudentStore>,
    config: RuntimeConfiguration,
}

impl RegistrarState {
    pub fn new(students: Arc<dyn StudentStore>, config: RuntimeConfiguration) -> Self {
        Self { students, config }
    }

    pub fn students(&self) -> &dyn StudentStore {
        self.students.as_ref()
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    /// Wraps a page in the site shell, showing (and so consuming) any pending flash messages.
    pub async fn render(&self, session: &RegistrarSession, markup: Markup) -> RegistrarResult<Markup> {
        let messages = flash::take(&session.session).await?;
        let nav = render_nav(is_authenticated(session));

        Ok(html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Student Enrollment" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (nav)
                    (render_flashes(&messages))
                    (markup)
                }
            }
        })
    }
}
