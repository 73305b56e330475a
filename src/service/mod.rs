//! StudentService: business rules over the student repository.

mod student;
pub use student::StudentService;
