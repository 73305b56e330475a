//! Shared application state for all routes.

use crate::repository::StudentRepository;
use crate::service::StudentService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
}

impl AppState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self {
            students: StudentService::new(repo),
        }
    }
}
