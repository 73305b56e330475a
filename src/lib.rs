//! Student records service: a small REST backend over one PostgreSQL table.
//!
//! Requests flow handler → [`StudentService`] → [`StudentRepository`] → store. The
//! repository reports a missing id as `None`; the service turns that into
//! [`AppError::StudentNotFound`], which the HTTP layer answers with 404.

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreBackend};
pub use entity::Student;
pub use error::{AppError, ConfigError};
pub use repository::{InMemoryStudentRepository, PgStudentRepository, StudentRepository};
pub use response::{success_empty, success_many, success_one};
pub use routes::{app, common_routes, common_routes_with_ready, student_routes};
pub use service::StudentService;
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_student_table};
