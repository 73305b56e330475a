//! StudentRepository: storage contract for students, with PostgreSQL and in-memory backends.

mod memory;
mod postgres;
pub use memory::InMemoryStudentRepository;
pub use postgres::PgStudentRepository;

use crate::entity::Student;
use crate::error::AppError;
use async_trait::async_trait;

/// Point lookups, name lookups, upsert and delete over stored students.
/// A missing id is `Ok(None)`, never an error; only the store itself can fail.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError>;

    /// All students with exactly this name, in the order they were first stored.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError>;

    /// Insert, or replace the student with the same id. Returns the stored value.
    async fn save(&self, student: &Student) -> Result<Student, AppError>;

    /// Remove the stored record with this student's id. Absent records are ignored.
    async fn delete(&self, student: &Student) -> Result<(), AppError>;

    /// Readiness check for the backing store.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
