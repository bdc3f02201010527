use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub location: String,
    /// Object key of the uploaded logo, served under `/media/logos/`.
    pub logo: Option<String>,
    pub description: String,
    pub employee_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyWithCount {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub logo: Option<String>,
    pub vacancy_count: i64,
}

/// Validated company fields. `logo: None` on update keeps the stored logo.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyData {
    pub name: String,
    pub location: String,
    pub description: String,
    pub employee_count: i32,
    pub logo: Option<String>,
}
