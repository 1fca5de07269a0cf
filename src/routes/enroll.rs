use crate::{
    auth::RegistrarSession,
    data::{StudentId, student::EnrollmentForm},
    error::{DuplicateContactSnafu, RegistrarResult},
    flash,
    maud_conveniences::{student_form, title},
    routes::ENROLLMENT_FORM_PATH,
    state::RegistrarState,
};
use axum::{Form, extract::State, response::Redirect};
use maud::{Markup, html};
use snafu::ensure;

pub async fn get_enrollment_form(
    State(state): State<RegistrarState>,
    session: RegistrarSession,
) -> RegistrarResult<Markup> {
    state
        .render(
            &session,
            html! {
                div class="bg-gray-800 shadow-md rounded px-8 pt-6 pb-8 mb-4 w-full max-w-3xl" {
                    (title("Student Enrollment Form"))
                    (student_form("/enroll", None, "Enroll"))
                }
            },
        )
        .await
}

async fn enroll(state: &RegistrarState, form: EnrollmentForm) -> RegistrarResult<StudentId> {
    let policy = state.config().enrollment_policy();
    let details = form.validate(policy)?;

    if !policy.allow_duplicate_contacts {
        let in_use = state
            .students()
            .contact_in_use(&details.email, &details.phone)
            .await?;
        ensure!(!in_use, DuplicateContactSnafu);
    }

    state.students().insert(details).await
}

pub async fn post_enroll(
    State(state): State<RegistrarState>,
    session: RegistrarSession,
    Form(form): Form<EnrollmentForm>,
) -> RegistrarResult<Redirect> {
    match enroll(&state, form).await {
        Ok(id) => {
            info!(id, "Enrolled new student");
            Ok(Redirect::to("/success"))
        }
        Err(e) if e.is_validation() => {
            info!(%e, "Rejected enrollment form");
            flash::push(&session.session, e.to_string()).await?;
            Ok(Redirect::to(ENROLLMENT_FORM_PATH))
        }
        Err(e) => {
            error!(?e, "Error enrolling student");
            flash::push(&session.session, "There was an error enrolling the student.").await?;
            Ok(Redirect::to(ENROLLMENT_FORM_PATH))
        }
    }
}
