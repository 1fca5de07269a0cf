use crate::{
    auth::AuthenticatedAdmin,
    data::StudentId,
    error::RegistrarResult,
    flash,
    maud_conveniences::render_table,
    routes::{DASHBOARD_PATH, delete_path, edit_path},
    state::RegistrarState,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use maud::{Markup, html};

pub async fn get_dashboard(
    State(state): State<RegistrarState>,
    AuthenticatedAdmin { session, admin }: AuthenticatedAdmin,
) -> RegistrarResult<Markup> {
    let students = state.students().select_all().await?;
    let count = students.len();

    let rows: Vec<[Markup; 9]> = students
        .into_iter()
        .map(|student| {
            let details = &student.details;
            [
                html! {(student.id)},
                html! {(details.student_name)},
                html! {(details.father_name)},
                html! {
                    a href={"mailto:" (details.email)} class="text-blue-400" {(details.email)}
                },
                html! {(details.phone)},
                html! {(details.city) ", " (details.state) " " (details.pin_code)},
                html! {(details.department)},
                html! {(details.course)},
                html! {
                    div class="flex flex-row space-x-2" {
                        a href=(edit_path(student.id)) class="bg-slate-600 hover:bg-slate-800 font-bold py-1 px-3 rounded" {"Edit"}
                        form method="post" action=(delete_path(student.id)) {
                            button type="submit" class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" {"Delete"}
                        }
                    }
                },
            ]
        })
        .collect();

    state
        .render(
            &session,
            html! {
                div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-6xl w-full flex flex-col space-y-4" {
                    p class="text-sm text-gray-400" {
                        "Logged in as " (admin.username) ". " (count) " enrolled."
                    }
                    (render_table(
                        "Enrolled Students",
                        ["ID", "Name", "Father's Name", "Email", "Phone", "Location", "Department", "Course", ""],
                        rows,
                    ))
                    @if count == 0 {
                        p class="italic text-gray-400" {"Nobody has enrolled yet."}
                    }
                }
            },
        )
        .await
}

pub async fn post_delete_student(
    State(state): State<RegistrarState>,
    AuthenticatedAdmin { session, .. }: AuthenticatedAdmin,
    Path(student_id): Path<StudentId>,
) -> RegistrarResult<Redirect> {
    match state.students().delete(student_id).await {
        Ok(()) => {
            info!(student_id, "Deleted student");
            flash::push(&session.session, "Student record deleted successfully!").await?;
        }
        Err(e) => {
            error!(?e, student_id, "Error deleting student");
            flash::push(&session.session, "There was an error deleting the student record.")
                .await?;
        }
    }

    Ok(Redirect::to(DASHBOARD_PATH))
}
