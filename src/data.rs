use crate::{
    data::student::{Student, StudentDetails},
    error::RegistrarResult,
};
use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod student;

pub type StudentId = i32;

/// Every operation acquires its own connection and gives it back before returning, on every path.
///
/// Writes run inside a transaction that is committed on success and rolled back on failure.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    async fn insert(&self, details: StudentDetails) -> RegistrarResult<StudentId>;
    ///ordered by id, empty when nobody has enrolled
    async fn select_all(&self) -> RegistrarResult<Vec<Student>>;
    async fn select_one(&self, id: StudentId) -> RegistrarResult<Option<Student>>;
    ///no existence check: a missing id updates zero rows and still succeeds
    async fn update(&self, id: StudentId, details: StudentDetails) -> RegistrarResult<()>;
    ///no existence check, same as `update`
    async fn delete(&self, id: StudentId) -> RegistrarResult<()>;
    async fn contact_in_use(&self, email: &str, phone: &str) -> RegistrarResult<bool>;
}
