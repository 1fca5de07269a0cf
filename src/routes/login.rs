use crate::{
    auth::{LOGIN_PATH, RegistrarSession, is_authenticated, log_in, log_out},
    error::RegistrarResult,
    flash,
    maud_conveniences::{form_submit_button, simple_form_element, title},
    routes::DASHBOARD_PATH,
    state::RegistrarState,
};
use axum::{
    Form,
    body::Body,
    extract::State,
    http::Response,
    response::{IntoResponse, Redirect},
};
use maud::html;
use secrecy::SecretString;
use serde::Deserialize;

pub async fn get_login(
    State(state): State<RegistrarState>,
    session: RegistrarSession,
) -> RegistrarResult<Response<Body>> {
    if is_authenticated(&session) {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    Ok(state
        .render(
            &session,
            html! {
                div class="bg-gray-800 shadow-md rounded px-8 pt-6 pb-8 mb-4 w-full max-w-sm" {
                    (title("Admin Login"))
                    form method="post" {
                        (simple_form_element("username", "Username", true, None, None))
                        (simple_form_element("password", "Password", true, Some("password"), None))
                        (form_submit_button(Some("Login")))
                    }
                }
            },
        )
        .await?
        .into_response())
}

#[derive(Deserialize)]
pub struct LoginForm {
    username: Option<String>,
    password: Option<SecretString>,
}

pub async fn post_login(
    mut session: RegistrarSession,
    Form(LoginForm { username, password }): Form<LoginForm>,
) -> RegistrarResult<Redirect> {
    let username = username.unwrap_or_default();
    let password = password.unwrap_or_else(|| SecretString::from(""));

    if log_in(&mut session, username, password).await? {
        Ok(Redirect::to(DASHBOARD_PATH))
    } else {
        // same message whichever half was wrong
        flash::push(&session.session, "Invalid credentials.").await?;
        Ok(Redirect::to(LOGIN_PATH))
    }
}

pub async fn get_logout(mut session: RegistrarSession) -> RegistrarResult<Redirect> {
    log_out(&mut session).await;
    flash::push(&session.session, "Logged out successfully.").await?;
    Ok(Redirect::to("/"))
}
