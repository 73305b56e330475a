//! Student lookups, creation and deletion. A missing id is an error here, not an empty result.

use crate::entity::Student;
use crate::error::AppError;
use crate::repository::StudentRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    /// Fetch one student. Fails with `StudentNotFound` when the id is not stored.
    pub async fn get_student_by_id(&self, id: i32) -> Result<Student, AppError> {
        tracing::debug!(id, "get student");
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            tracing::debug!(id, "student not found");
            AppError::StudentNotFound(id)
        })
    }

    /// Store a student and return what the repository stored.
    pub async fn add_student(&self, student: Student) -> Result<Student, AppError> {
        let saved = self.repo.save(&student).await?;
        tracing::info!(id = saved.id, "student saved");
        Ok(saved)
    }

    /// Delete by id. The stored record is looked up first and then deleted by value;
    /// nothing is deleted when the id is missing.
    pub async fn delete_student_by_id(&self, id: i32) -> Result<(), AppError> {
        let student = self.get_student_by_id(id).await?;
        self.repo.delete(&student).await?;
        tracing::info!(id, "student deleted");
        Ok(())
    }

    pub async fn get_students_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        tracing::debug!(name = %name, "get students by name");
        self.repo.find_by_name(name).await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.repo.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers lookups from a fixed record and records every call made to it.
    #[derive(Default)]
    struct RecordingRepository {
        stored: Option<Student>,
        saves: Mutex<Vec<Student>>,
        deletes: Mutex<Vec<Student>>,
    }

    impl RecordingRepository {
        fn holding(student: Student) -> Self {
            Self {
                stored: Some(student),
                ..Default::default()
            }
        }

        fn deletes(&self) -> Vec<Student> {
            self.deletes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StudentRepository for RecordingRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
            Ok(self.stored.clone().filter(|s| s.id == id))
        }

        async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
            Ok(self.stored.clone().into_iter().filter(|s| s.name == name).collect())
        }

        async fn save(&self, student: &Student) -> Result<Student, AppError> {
            self.saves.lock().unwrap().push(student.clone());
            Ok(student.clone())
        }

        async fn delete(&self, student: &Student) -> Result<(), AppError> {
            self.deletes.lock().unwrap().push(student.clone());
            Ok(())
        }
    }

    /// Fails every call the way an unreachable database would.
    struct BrokenRepository;

    #[async_trait]
    impl StudentRepository for BrokenRepository {
        async fn find_by_id(&self, _id: i32) -> Result<Option<Student>, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }

        async fn find_by_name(&self, _name: &str) -> Result<Vec<Student>, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }

        async fn save(&self, _student: &Student) -> Result<Student, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }

        async fn delete(&self, _student: &Student) -> Result<(), AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }

        async fn ping(&self) -> Result<(), AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }
    }

    fn service_over(repo: Arc<RecordingRepository>) -> StudentService {
        StudentService::new(repo)
    }

    #[tokio::test]
    async fn get_student_by_id_returns_stored_student() {
        let student = Student::new(1, "Test Name", 1, "Test Address");
        let service = service_over(Arc::new(RecordingRepository::holding(student.clone())));

        assert_eq!(service.get_student_by_id(1).await.unwrap(), student);
    }

    #[tokio::test]
    async fn get_student_by_id_fails_for_missing_id() {
        let service = service_over(Arc::new(RecordingRepository::default()));

        let err = service.get_student_by_id(1).await.unwrap_err();
        assert!(matches!(err, AppError::StudentNotFound(1)));
        assert_eq!(err.to_string(), "Student with id : 1 doesn't exist.");
    }

    #[tokio::test]
    async fn add_student_returns_saved_value() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_over(repo.clone());
        let student = Student::new(1, "Aya", 1, "California");

        assert_eq!(service.add_student(student.clone()).await.unwrap(), student);
        assert_eq!(*repo.saves.lock().unwrap(), vec![student]);
    }

    #[tokio::test]
    async fn delete_student_by_id_deletes_found_record_once() {
        let student = Student::new(1, "Aya", 1, "California");
        let repo = Arc::new(RecordingRepository::holding(student.clone()));
        let service = service_over(repo.clone());

        service.delete_student_by_id(1).await.unwrap();
        assert_eq!(repo.deletes(), vec![student]);
    }

    #[tokio::test]
    async fn delete_student_by_id_fails_for_missing_id_without_deleting() {
        let repo = Arc::new(RecordingRepository::holding(Student::new(2, "Aya", 1, "Canada")));
        let service = service_over(repo.clone());

        let err = service.delete_student_by_id(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Student with id : 1 doesn't exist.");
        assert!(repo.deletes().is_empty());
    }

    #[tokio::test]
    async fn get_students_by_name_passes_through() {
        let student = Student::new(1, "Aya", 1, "California");
        let service = service_over(Arc::new(RecordingRepository::holding(student.clone())));

        assert_eq!(service.get_students_by_name("Aya").await.unwrap(), vec![student]);
        assert!(service.get_students_by_name("Ben").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failures_are_not_reported_as_not_found() {
        let service = StudentService::new(Arc::new(BrokenRepository));

        assert!(matches!(service.get_student_by_id(1).await, Err(AppError::Db(_))));
        assert!(matches!(service.delete_student_by_id(1).await, Err(AppError::Db(_))));
        assert!(matches!(
            service.add_student(Student::new(1, "Aya", 1, "California")).await,
            Err(AppError::Db(_))
        ));
        assert!(service.ping().await.is_err());
    }
}
