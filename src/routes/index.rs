use crate::{
    auth::{LOGIN_PATH, RegistrarSession},
    error::RegistrarResult,
    maud_conveniences::{link_button, title},
    routes::ENROLLMENT_FORM_PATH,
    state::RegistrarState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(
    State(state): State<RegistrarState>,
    session: RegistrarSession,
) -> RegistrarResult<Markup> {
    state
        .render(
            &session,
            html! {
                div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
                    h1 class="text-2xl font-semibold mb-6 text-center" {
                        "Student Enrollment"
                    }

                    div class="flex flex-row space-x-4 justify-center" {
                        (link_button(ENROLLMENT_FORM_PATH, "Enroll as a Student"))
                        (link_button(LOGIN_PATH, "Admin Login"))
                    }
                }
            },
        )
        .await
}

pub async fn get_success(
    State(state): State<RegistrarState>,
    session: RegistrarSession,
) -> RegistrarResult<Markup> {
    state
        .render(
            &session,
            html! {
                div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full text-center" {
                    (title("Enrollment Submitted"))
                    p class="mb-6 text-gray-300" {
                        "Thank you, your enrollment form has been received."
                    }
                    (link_button("/", "Back to Home"))
                }
            },
        )
        .await
}
