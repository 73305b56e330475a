//! Student storage in a PostgreSQL table.

use super::StudentRepository;
use crate::entity::Student;
use crate::error::AppError;
use crate::store::qualified_student_table;
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, name, roll_no, address";

#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
    table: String,
}

impl PgStudentRepository {
    /// `schema` must already hold the table (see `store::ensure_student_table`).
    pub fn new(pool: PgPool, schema: &str) -> Self {
        Self {
            pool,
            table: qualified_student_table(schema),
        }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, self.table);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE name = $1 ORDER BY inserted_seq",
            COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, name = %name, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn save(&self, student: &Student) -> Result<Student, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, name, roll_no, address) VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name, roll_no = EXCLUDED.roll_no, address = EXCLUDED.address
            RETURNING {}
            "#,
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, id = student.id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(student.id)
            .bind(&student.name)
            .bind(student.roll_no)
            .bind(&student.address)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, student: &Student) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id = student.id, "query");
        sqlx::query(&sql).bind(student.id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
