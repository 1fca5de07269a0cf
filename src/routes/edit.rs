use crate::{
    auth::AuthenticatedAdmin,
    data::{StudentId, student::EnrollmentForm},
    error::{MissingStudentSnafu, RegistrarResult},
    flash,
    maud_conveniences::{student_form, title},
    routes::{DASHBOARD_PATH, edit_path},
    state::RegistrarState,
};
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use maud::{Markup, html};
use snafu::OptionExt;

pub async fn get_edit_student(
    State(state): State<RegistrarState>,
    AuthenticatedAdmin { session, .. }: AuthenticatedAdmin,
    Path(student_id): Path<StudentId>,
) -> RegistrarResult<Markup> {
    let student = state
        .students()
        .select_one(student_id)
        .await?
        .context(MissingStudentSnafu { id: student_id })?;

    state
        .render(
            &session,
            html! {
                div class="bg-gray-800 shadow-md rounded px-8 pt-6 pb-8 mb-4 w-full max-w-3xl" {
                    (title(html! {"Editing Student #" (student.id)}))
                    (student_form(&edit_path(student.id), Some(&student.details), "Save Changes"))
                    a href=(DASHBOARD_PATH) class="underline text-gray-300" {"Back to dashboard"}
                }
            },
        )
        .await
}

/// Duplicate contacts are never checked here, the record being edited would always match itself.
async fn update(
    state: &RegistrarState,
    student_id: StudentId,
    form: EnrollmentForm,
) -> RegistrarResult<()> {
    let details = form.validate(state.config().enrollment_policy())?;
    state.students().update(student_id, details).await
}

pub async fn post_edit_student(
    State(state): State<RegistrarState>,
    AuthenticatedAdmin { session, .. }: AuthenticatedAdmin,
    Path(student_id): Path<StudentId>,
    Form(form): Form<EnrollmentForm>,
) -> RegistrarResult<Redirect> {
    match update(&state, student_id, form).await {
        Ok(()) => {
            info!(student_id, "Updated student");
            flash::push(&session.session, "Student record updated successfully.").await?;
        }
        Err(e) if e.is_validation() => {
            info!(%e, student_id, "Rejected student edit");
            flash::push(&session.session, e.to_string()).await?;
        }
        Err(e) => {
            error!(?e, student_id, "Error updating student");
            flash::push(&session.session, "There was an error updating the student record.")
                .await?;
        }
    }

    Ok(Redirect::to(&edit_path(student_id)))
}
