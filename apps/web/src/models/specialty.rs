use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Specialty {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub picture: Option<String>,
}

/// Specialty annotated with the number of vacancies filed under it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpecialtyWithCount {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub picture: Option<String>,
    pub vacancy_count: i64,
}
