//! Process-local student storage. Keeps insertion order so name lookups match the table's.

use super::StudentRepository;
use crate::entity::Student;
use crate::error::AppError;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<Vec<Student>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store; later duplicates of an id replace earlier ones in place.
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        let mut stored: Vec<Student> = Vec::new();
        for s in students {
            upsert(&mut stored, s);
        }
        Self {
            students: RwLock::new(stored),
        }
    }

    pub async fn len(&self) -> usize {
        self.students.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.students.read().await.is_empty()
    }
}

fn upsert(stored: &mut Vec<Student>, student: Student) {
    match stored.iter_mut().find(|s| s.id == student.id) {
        Some(existing) => *existing = student,
        None => stored.push(student),
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        Ok(self.students.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect())
    }

    async fn save(&self, student: &Student) -> Result<Student, AppError> {
        upsert(&mut *self.students.write().await, student.clone());
        Ok(student.clone())
    }

    async fn delete(&self, student: &Student) -> Result<(), AppError> {
        self.students.write().await.retain(|s| s.id != student.id);
        Ok(())
    }
}
