use crate::{
    auth::{LOGIN_PATH, backend::RegistrarAuthBackend},
    data::StudentId,
    routes::{
        dashboard::{get_dashboard, post_delete_student},
        edit::{get_edit_student, post_edit_student},
        enroll::{get_enrollment_form, post_enroll},
        index::{get_index_route, get_success},
        login::{get_login, get_logout, post_login},
    },
    state::RegistrarState,
};
use axum::{
    Router,
    routing::{get, post},
};
use axum_login::{
    AuthManagerLayerBuilder,
    tower_sessions::{Expiry, SessionManagerLayer, SessionStore, cookie::time::Duration},
};
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

pub mod dashboard;
pub mod edit;
pub mod enroll;
pub mod index;
pub mod login;

pub const DASHBOARD_PATH: &str = "/admin/dashboard";
pub const ENROLLMENT_FORM_PATH: &str = "/register";

pub fn edit_path(student_id: StudentId) -> String {
    format!("/admin/edit/{student_id}")
}

pub fn delete_path(student_id: StudentId) -> String {
    format!("/admin/delete/{student_id}")
}

/// Builds the whole site on top of whichever session store it is given.
pub fn build_app<Store: SessionStore + Clone>(state: RegistrarState, session_store: Store) -> Router {
    let session_layer = SessionManagerLayer::new(session_store)
        .with_expiry(Expiry::OnInactivity(Duration::days(5)))
        .with_signed(state.config().session_key());
    let auth_backend = RegistrarAuthBackend::new(state.config().admin_credentials());
    let auth_layer = AuthManagerLayerBuilder::new(auth_backend, session_layer).build();

    Router::new()
        .route("/", get(get_index_route))
        .route(ENROLLMENT_FORM_PATH, get(get_enrollment_form))
        .route("/enroll", post(post_enroll))
        .route("/success", get(get_success))
        .route(LOGIN_PATH, get(get_login).post(post_login))
        .route(DASHBOARD_PATH, get(get_dashboard))
        .route(
            "/admin/edit/{student_id}",
            get(get_edit_student).post(post_edit_student),
        )
        .route("/admin/delete/{student_id}", post(post_delete_student))
        .route("/admin/logout", get(get_logout))
        .layer(auth_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}
