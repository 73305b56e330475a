//! Student routes. Both `/student` and `/student/` are accepted for the collection.

use crate::handlers::student::{add_student, delete_student, find_students_by_name, get_student};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/student", post(add_student).get(find_students_by_name))
        .route("/student/", post(add_student).get(find_students_by_name))
        .route("/student/:id", get(get_student).delete(delete_student))
        .with_state(state)
}
