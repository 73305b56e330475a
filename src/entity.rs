//! Student entity: the wire record and the `student` table row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `student` table. On the wire the roll number is `rollNo`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub roll_no: i32,
    pub address: String,
}

impl Student {
    pub fn new(id: i32, name: impl Into<String>, roll_no: i32, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roll_no,
            address: address.into(),
        }
    }
}
