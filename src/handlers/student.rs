//! Student handlers: add, get by id, delete by id, find by name.
//! Extractor rejections are turned into `AppError` so every failure uses the error envelope.

use crate::entity::Student;
use crate::error::AppError;
use crate::response::{success_empty, success_many, success_one};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

fn student_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// POST /student/
pub async fn add_student(
    State(state): State<AppState>,
    body: Result<Json<Student>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(student) = body?;
    let saved = state.students.add_student(student).await?;
    Ok(success_one(saved))
}

/// GET /student/:id
pub async fn get_student(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = student_id(path)?;
    let student = state.students.get_student_by_id(id).await?;
    Ok(success_one(student))
}

/// DELETE /student/:id
pub async fn delete_student(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = student_id(path)?;
    state.students.delete_student_by_id(id).await?;
    Ok(success_empty())
}

/// GET /student/?name=
pub async fn find_students_by_name(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(NameQuery { name }) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let students = state.students.get_students_by_name(&name).await?;
    Ok(success_many(students))
}
