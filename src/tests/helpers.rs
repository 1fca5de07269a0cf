//! Test fixtures and a small cookie-carrying client for driving the router.

use crate::{
    config::{EnrollmentPolicy, RuntimeConfiguration},
    data::{memory::MemoryStudentStore, student::StudentDetails},
    routes::build_app,
    state::RegistrarState,
};
use axum::{
    Router,
    body::Body,
    http::{
        Request,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        request::Builder,
    },
    response::Response,
};
use axum_login::tower_sessions::MemoryStore;
use std::{env::VarError, fmt::Write, sync::Arc};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub fn asha() -> StudentDetails {
    StudentDetails {
        student_name: "Asha Rao".into(),
        father_name: "Vikram Rao".into(),
        email: "asha@example.com".into(),
        phone: "+91 98765-43210".into(),
        address: "12 MG Road".into(),
        city: "Pune".into(),
        state: "Maharashtra".into(),
        pin_code: "411001".into(),
        department: "Engineering".into(),
        course: "Computer Science".into(),
        comments: "Needs hostel accommodation".into(),
    }
}

pub fn test_config(policy: EnrollmentPolicy) -> RuntimeConfiguration {
    let flag = |value: bool| if value { "true" } else { "false" };

    RuntimeConfiguration::from_vars(move |name| {
        let value = match name {
            "DB_USER" => "registrar",
            "DB_PASSWORD" => "unused",
            "DB_HOST" => "localhost",
            "DB_PORT" => "5432",
            "DB_NAME" => "student_enrollment",
            "SECRET_KEY" => "test-session-secret",
            "ADMIN_USERNAME" => ADMIN_USERNAME,
            "ADMIN_PASSWORD" => ADMIN_PASSWORD,
            "ENROLLMENT_ALLOW_DUPLICATE_CONTACTS" => flag(policy.allow_duplicate_contacts),
            "ENROLLMENT_VALIDATE_CONTACT_FORMAT" => flag(policy.validate_contact_format),
            _ => return Err(dotenvy::Error::EnvVar(VarError::NotPresent)),
        };
        Ok(value.to_string())
    })
    .expect("test config is complete")
}

pub fn form_fields(details: &StudentDetails) -> Vec<(&'static str, &str)> {
    details
        .fields()
        .into_iter()
        .map(|field| (field.name, field.value))
        .collect()
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    let encode = |s: &str| {
        let mut out = String::new();
        for byte in s.bytes() {
            match byte {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'*' => {
                    out.push(char::from(byte));
                }
                b' ' => out.push('+'),
                _ => write!(out, "%{byte:02X}").unwrap(),
            }
        }
        out
    };

    fields
        .iter()
        .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("response is a redirect")
        .to_str()
        .unwrap()
}

/// Acts like one browser: remembers the session cookie between requests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
    pub students: Arc<MemoryStudentStore>,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_policy(EnrollmentPolicy::default())
    }

    pub fn with_policy(policy: EnrollmentPolicy) -> Self {
        let students = Arc::new(MemoryStudentStore::default());
        let state = RegistrarState::new(students.clone(), test_config(policy));

        Self {
            app: build_app(state, MemoryStore::default()),
            cookie: None,
            students,
        }
    }

    async fn send(&mut self, request: Builder, body: Body) -> Response {
        let request = match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
        .body(body)
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        response
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::builder().method("GET").uri(uri), Body::empty())
            .await
    }

    pub async fn post(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(encode_form(fields)),
        )
        .await
    }

    pub async fn log_in(&mut self) -> Response {
        self.post(
            "/admin/login",
            &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)],
        )
        .await
    }

    pub async fn enroll(&mut self, details: &StudentDetails) -> Response {
        self.post("/enroll", &form_fields(details)).await
    }
}

#[test]
fn form_encoding_escapes_reserved_characters() {
    assert_eq!(
        encode_form(&[("phone", "+91 98"), ("email", "a@b.c"), ("x", "1&2=3")]),
        "phone=%2B91+98&email=a%40b.c&x=1%262%3D3"
    );
}
