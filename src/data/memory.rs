use crate::{
    data::{
        StudentId, StudentStore,
        student::{Student, StudentDetails},
    },
    error::{RegistrarError, RegistrarResult},
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

/// Stand-in store for driving the routes without Postgres.
///
/// Counts every call so tests can check that rejected requests never reach the data layer.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    students: Mutex<BTreeMap<StudentId, StudentDetails>>,
    last_id: Mutex<StudentId>,
    operations: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStudentStore {
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    ///makes every write fail like a dropped connection, leaving the data untouched
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn student_count(&self) -> usize {
        self.students.lock().unwrap().len()
    }

    fn record_operation(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }

    fn check_write(&self) -> RegistrarResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(RegistrarError::MakeQuery {
                source: sqlx::Error::PoolTimedOut,
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn insert(&self, details: StudentDetails) -> RegistrarResult<StudentId> {
        self.record_operation();
        self.check_write()?;

        let mut last_id = self.last_id.lock().unwrap();
        *last_id += 1;
        self.students.lock().unwrap().insert(*last_id, details);
        Ok(*last_id)
    }

    async fn select_all(&self) -> RegistrarResult<Vec<Student>> {
        self.record_operation();
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .map(|(id, details)| Student {
                id: *id,
                details: details.clone(),
            })
            .collect())
    }

    async fn select_one(&self, id: StudentId) -> RegistrarResult<Option<Student>> {
        self.record_operation();
        Ok(self
            .students
            .lock()
            .unwrap()
            .get(&id)
            .map(|details| Student {
                id,
                details: details.clone(),
            }))
    }

    async fn update(&self, id: StudentId, details: StudentDetails) -> RegistrarResult<()> {
        self.record_operation();
        self.check_write()?;

        if let Some(existing) = self.students.lock().unwrap().get_mut(&id) {
            *existing = details;
        }
        Ok(())
    }

    async fn delete(&self, id: StudentId) -> RegistrarResult<()> {
        self.record_operation();
        self.check_write()?;

        self.students.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn contact_in_use(&self, email: &str, phone: &str) -> RegistrarResult<bool> {
        self.record_operation();
        Ok(self
            .students
            .lock()
            .unwrap()
            .values()
            .any(|details| details.email == email || details.phone == phone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::asha;

    #[tokio::test]
    async fn inserted_record_reads_back_identically() {
        let store = MemoryStudentStore::default();
        let id = store.insert(asha()).await.unwrap();

        let student = store.select_one(id).await.unwrap().unwrap();
        assert_eq!(student.id, id);
        assert_eq!(student.details, asha());
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryStudentStore::default();
        let first = store.insert(asha()).await.unwrap();
        store.delete(first).await.unwrap();
        let second = store.insert(asha()).await.unwrap();

        assert_ne!(first, second);
        assert!(store.select_one(first).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_of_missing_id_creates_nothing() {
        let store = MemoryStudentStore::default();
        store.update(99, asha()).await.unwrap();

        assert!(store.select_one(99).await.unwrap().is_none());
        assert!(store.select_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_write_leaves_store_untouched() {
        let store = MemoryStudentStore::default();
        let id = store.insert(asha()).await.unwrap();
        store.set_fail_writes(true);

        let mut changed = asha();
        changed.city = "Mumbai".into();
        assert!(store.update(id, changed).await.is_err());
        assert!(store.insert(asha()).await.is_err());
        assert!(store.delete(id).await.is_err());

        assert_eq!(store.select_all().await.unwrap(), vec![Student { id, details: asha() }]);
    }
}
