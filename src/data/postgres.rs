use crate::{
    data::{
        StudentId, StudentStore,
        student::{Student, StudentDetails},
    },
    error::{
        CommitTransactionSnafu, GetDatabaseConnectionSnafu, MakeQuerySnafu, RegistrarError,
        RegistrarResult,
    },
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{
    Pool, Postgres, Row, Transaction,
    pool::PoolConnection,
    postgres::PgArguments,
    query::Query,
};

const SELECT_STUDENTS: &str = "SELECT id, student_name, father_name, email, phone, address, city, state, pin_code, department, course, comments FROM public.students";

#[derive(Debug, Clone)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub const fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn get_connection(&self) -> RegistrarResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }

    async fn get_transaction(&self) -> RegistrarResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.context(GetDatabaseConnectionSnafu)
    }

    /// Commits if the statement went through, otherwise rolls back and hands back the query error.
    async fn finish<T>(
        transaction: Transaction<'static, Postgres>,
        result: Result<T, sqlx::Error>,
    ) -> RegistrarResult<T> {
        match result {
            Ok(value) => {
                transaction.commit().await.context(CommitTransactionSnafu)?;
                Ok(value)
            }
            Err(query) => match transaction.rollback().await {
                Ok(()) => Err(RegistrarError::MakeQuery { source: query }),
                Err(source) => Err(RegistrarError::RollbackTransaction { source, query }),
            },
        }
    }
}

fn bind_details(
    query: Query<'_, Postgres, PgArguments>,
    details: StudentDetails,
) -> Query<'_, Postgres, PgArguments> {
    let StudentDetails {
        student_name,
        father_name,
        email,
        phone,
        address,
        city,
        state,
        pin_code,
        department,
        course,
        comments,
    } = details;

    query
        .bind(student_name)
        .bind(father_name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(city)
        .bind(state)
        .bind(pin_code)
        .bind(department)
        .bind(course)
        .bind(comments)
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn insert(&self, details: StudentDetails) -> RegistrarResult<StudentId> {
        let mut transaction = self.get_transaction().await?;

        let result = bind_details(
            sqlx::query("INSERT INTO public.students (student_name, father_name, email, phone, address, city, state, pin_code, department, course, comments) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING id"),
            details,
        )
        .fetch_one(&mut *transaction)
        .await
        .and_then(|row| row.try_get::<StudentId, _>("id"));

        Self::finish(transaction, result).await
    }

    async fn select_all(&self) -> RegistrarResult<Vec<Student>> {
        let mut connection = self.get_connection().await?;

        sqlx::query_as::<_, Student>(&format!("{SELECT_STUDENTS} ORDER BY id"))
            .fetch_all(&mut *connection)
            .await
            .context(MakeQuerySnafu)
    }

    async fn select_one(&self, id: StudentId) -> RegistrarResult<Option<Student>> {
        let mut connection = self.get_connection().await?;

        sqlx::query_as::<_, Student>(&format!("{SELECT_STUDENTS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *connection)
            .await
            .context(MakeQuerySnafu)
    }

    async fn update(&self, id: StudentId, details: StudentDetails) -> RegistrarResult<()> {
        let mut transaction = self.get_transaction().await?;

        let result = bind_details(
            sqlx::query("UPDATE public.students SET student_name = $1, father_name = $2, email = $3, phone = $4, address = $5, city = $6, state = $7, pin_code = $8, department = $9, course = $10, comments = $11 WHERE id = $12"),
            details,
        )
        .bind(id)
        .execute(&mut *transaction)
        .await;

        Self::finish(transaction, result).await.map(|_| ())
    }

    async fn delete(&self, id: StudentId) -> RegistrarResult<()> {
        let mut transaction = self.get_transaction().await?;

        let result = sqlx::query("DELETE FROM public.students WHERE id = $1")
            .bind(id)
            .execute(&mut *transaction)
            .await;

        Self::finish(transaction, result).await.map(|_| ())
    }

    async fn contact_in_use(&self, email: &str, phone: &str) -> RegistrarResult<bool> {
        let mut connection = self.get_connection().await?;

        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM public.students WHERE email = $1 OR phone = $2)",
        )
        .bind(email)
        .bind(phone)
        .fetch_one(&mut *connection)
        .await
        .context(MakeQuerySnafu)
    }
}
