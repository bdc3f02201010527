//! Persistence seam for the job board.
//!
//! `AppState` carries an `Arc<dyn JobBoardStore>`. Production wires in
//! `PgStore`; handler tests use the in-memory store. Lookups that can miss
//! return `Option` and the handler decides whether that is a 404.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{
    Application, ApplicationData, Company, CompanyData, CompanyWithCount, Specialty,
    SpecialtyWithCount, User, Vacancy, VacancyData, VacancyListing,
};

pub use postgres::PgStore;

#[async_trait]
pub trait JobBoardStore: Send + Sync {
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn list_specialties(&self) -> Result<Vec<Specialty>, AppError>;
    async fn specialties_with_counts(&self) -> Result<Vec<SpecialtyWithCount>, AppError>;
    async fn find_specialty_by_code(&self, code: &str) -> Result<Option<Specialty>, AppError>;

    async fn companies_with_counts(&self) -> Result<Vec<CompanyWithCount>, AppError>;
    async fn find_company(&self, id: i64) -> Result<Option<Company>, AppError>;
    async fn find_company_by_owner(&self, owner_id: i64) -> Result<Option<Company>, AppError>;
    /// Inserts the owner's company. `None` when the owner already has one.
    async fn create_company(
        &self,
        owner_id: i64,
        data: &CompanyData,
    ) -> Result<Option<Company>, AppError>;
    /// Overwrites the profile fields; a `None` logo keeps the current one.
    async fn update_company(&self, id: i64, data: &CompanyData) -> Result<Company, AppError>;

    /// All vacancies, newest first.
    async fn list_vacancies(&self) -> Result<Vec<VacancyListing>, AppError>;
    async fn vacancies_by_specialty(
        &self,
        specialty_id: i64,
    ) -> Result<Vec<VacancyListing>, AppError>;
    async fn vacancies_by_company(&self, company_id: i64)
        -> Result<Vec<VacancyListing>, AppError>;
    async fn find_vacancy(&self, id: i64) -> Result<Option<VacancyListing>, AppError>;
    /// Resolves a vacancy only if it belongs to the company owned by `owner_id`.
    async fn find_owned_vacancy(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Vacancy>, AppError>;
    async fn create_vacancy(&self, company_id: i64, data: &VacancyData)
        -> Result<Vacancy, AppError>;
    async fn update_vacancy(&self, id: i64, data: &VacancyData) -> Result<Vacancy, AppError>;

    async fn create_application(
        &self,
        vacancy_id: i64,
        user_id: i64,
        data: &ApplicationData,
    ) -> Result<Application, AppError>;
}
