use crate::{
    config::EnrollmentPolicy,
    data::StudentId,
    error::{InvalidEmailSnafu, InvalidPhoneSnafu, MissingFieldSnafu, RegistrarResult},
};
use email_address::EmailAddress;
use serde::Deserialize;
use snafu::{OptionExt, ResultExt, ensure};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: StudentId,
    #[sqlx(flatten)]
    pub details: StudentDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct StudentDetails {
    pub student_name: String,
    pub father_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub department: String,
    pub course: String,
    pub comments: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    LongText,
}

pub struct StudentField<'a> {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: &'a str,
}

impl StudentDetails {
    pub fn fields(&self) -> [StudentField<'_>; 11] {
        let field = |name, label, kind, value| StudentField {
            name,
            label,
            kind,
            value,
        };

        [
            field("student_name", "Student Name", FieldKind::Text, &self.student_name),
            field("father_name", "Father's Name", FieldKind::Text, &self.father_name),
            field("email", "Email", FieldKind::Email, &self.email),
            field("phone", "Phone", FieldKind::Phone, &self.phone),
            field("address", "Address", FieldKind::LongText, &self.address),
            field("city", "City", FieldKind::Text, &self.city),
            field("state", "State", FieldKind::Text, &self.state),
            field("pin_code", "PIN Code", FieldKind::Text, &self.pin_code),
            field("department", "Department", FieldKind::Text, &self.department),
            field("course", "Course", FieldKind::Text, &self.course),
            field("comments", "Comments", FieldKind::LongText, &self.comments),
        ]
    }
}

/// The enrollment form as it arrives over the wire, before anything has been checked.
///
/// Used for both new enrollments and admin edits.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct EnrollmentForm {
    pub student_name: Option<String>,
    pub father_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
    pub department: Option<String>,
    pub course: Option<String>,
    pub comments: Option<String>,
}

impl EnrollmentForm {
    /// Every field must be submitted, and all but `comments` must be non-blank.
    ///
    /// Values are stored exactly as typed. Email/phone shape is only checked when the policy asks for it.
    pub fn validate(self, policy: EnrollmentPolicy) -> RegistrarResult<StudentDetails> {
        fn required(value: Option<String>, field: &'static str) -> RegistrarResult<String> {
            let value = value.context(MissingFieldSnafu { field })?;
            ensure!(!value.trim().is_empty(), MissingFieldSnafu { field });
            Ok(value)
        }

        let details = StudentDetails {
            student_name: required(self.student_name, "student_name")?,
            father_name: required(self.father_name, "father_name")?,
            email: required(self.email, "email")?,
            phone: required(self.phone, "phone")?,
            address: required(self.address, "address")?,
            city: required(self.city, "city")?,
            state: required(self.state, "state")?,
            pin_code: required(self.pin_code, "pin_code")?,
            department: required(self.department, "department")?,
            course: required(self.course, "course")?,
            comments: self.comments.context(MissingFieldSnafu { field: "comments" })?,
        };

        if policy.validate_contact_format {
            EmailAddress::from_str(details.email.trim()).context(InvalidEmailSnafu {
                email: details.email.clone(),
            })?;
            ensure!(
                is_plausible_phone(&details.phone),
                InvalidPhoneSnafu {
                    phone: details.phone.clone()
                }
            );
        }

        Ok(details)
    }
}

#[cfg(test)]
impl From<StudentDetails> for EnrollmentForm {
    fn from(details: StudentDetails) -> Self {
        Self {
            student_name: Some(details.student_name),
            father_name: Some(details.father_name),
            email: Some(details.email),
            phone: Some(details.phone),
            address: Some(details.address),
            city: Some(details.city),
            state: Some(details.state),
            pin_code: Some(details.pin_code),
            department: Some(details.department),
            course: Some(details.course),
            comments: Some(details.comments),
        }
    }
}

///7-15 digits, optionally led by a `+`, with spaces and dashes allowed as separators
fn is_plausible_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let rest = phone.strip_prefix('+').unwrap_or(phone);

    let mut digits = 0;
    for c in rest.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' => {}
            _ => return false,
        }
    }

    (7..=15).contains(&digits)
}
