//! In-memory `JobBoardStore` for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use super::JobBoardStore;
use crate::errors::AppError;
use crate::models::{
    Application, ApplicationData, Company, CompanyData, CompanyWithCount, Specialty,
    SpecialtyWithCount, User, Vacancy, VacancyData, VacancyListing,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    specialties: Vec<Specialty>,
    companies: Vec<Company>,
    vacancies: Vec<Vacancy>,
    applications: Vec<Application>,
}

impl Tables {
    fn listing(&self, vacancy: &Vacancy) -> VacancyListing {
        let company = self
            .companies
            .iter()
            .find(|c| c.id == vacancy.company_id);
        let specialty = vacancy
            .specialty_id
            .and_then(|id| self.specialties.iter().find(|s| s.id == id));
        VacancyListing {
            id: vacancy.id,
            title: vacancy.title.clone(),
            skills: vacancy.skills.clone(),
            description: vacancy.description.clone(),
            salary_min: vacancy.salary_min,
            salary_max: vacancy.salary_max,
            published_at: vacancy.published_at,
            company_id: vacancy.company_id,
            company_name: company.map(|c| c.name.clone()).unwrap_or_default(),
            company_logo: company.and_then(|c| c.logo.clone()),
            specialty_id: vacancy.specialty_id,
            specialty_title: specialty.map(|s| s.title.clone()),
        }
    }

    fn listings(&self, keep: impl Fn(&Vacancy) -> bool) -> Vec<VacancyListing> {
        let mut rows: Vec<_> = self
            .vacancies
            .iter()
            .filter(|v| keep(v))
            .map(|v| self.listing(v))
            .collect();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        rows
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn add_user(&self, username: &str) -> User {
        let mut tables = self.tables.lock().unwrap();
        let user = User {
            id: tables.users.len() as i64 + 1,
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        user
    }

    pub fn add_specialty(&self, code: &str, title: &str) -> Specialty {
        let mut tables = self.tables.lock().unwrap();
        let specialty = Specialty {
            id: tables.specialties.len() as i64 + 1,
            code: code.to_string(),
            title: title.to_string(),
            picture: None,
        };
        tables.specialties.push(specialty.clone());
        specialty
    }

    pub fn applications(&self) -> Vec<Application> {
        self.tables.lock().unwrap().applications.clone()
    }

    pub fn companies(&self) -> Vec<Company> {
        self.tables.lock().unwrap().companies.clone()
    }

    pub fn vacancies(&self) -> Vec<Vacancy> {
        self.tables.lock().unwrap().vacancies.clone()
    }
}

#[async_trait]
impl JobBoardStore for MemoryStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>, AppError> {
        Ok(self.tables.lock().unwrap().specialties.clone())
    }

    async fn specialties_with_counts(&self) -> Result<Vec<SpecialtyWithCount>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .specialties
            .iter()
            .map(|s| SpecialtyWithCount {
                id: s.id,
                code: s.code.clone(),
                title: s.title.clone(),
                picture: s.picture.clone(),
                vacancy_count: tables
                    .vacancies
                    .iter()
                    .filter(|v| v.specialty_id == Some(s.id))
                    .count() as i64,
            })
            .collect())
    }

    async fn find_specialty_by_code(&self, code: &str) -> Result<Option<Specialty>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.specialties.iter().find(|s| s.code == code).cloned())
    }

    async fn companies_with_counts(&self) -> Result<Vec<CompanyWithCount>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .companies
            .iter()
            .map(|c| CompanyWithCount {
                id: c.id,
                name: c.name.clone(),
                location: c.location.clone(),
                logo: c.logo.clone(),
                vacancy_count: tables
                    .vacancies
                    .iter()
                    .filter(|v| v.company_id == c.id)
                    .count() as i64,
            })
            .collect())
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn find_company_by_owner(&self, owner_id: i64) -> Result<Option<Company>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .companies
            .iter()
            .find(|c| c.owner_id == owner_id)
            .cloned())
    }

    async fn create_company(
        &self,
        owner_id: i64,
        data: &CompanyData,
    ) -> Result<Option<Company>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.companies.iter().any(|c| c.owner_id == owner_id) {
            return Ok(None);
        }
        let company = Company {
            id: tables.companies.len() as i64 + 1,
            owner_id,
            name: data.name.clone(),
            location: data.location.clone(),
            logo: data.logo.clone(),
            description: data.description.clone(),
            employee_count: data.employee_count,
        };
        tables.companies.push(company.clone());
        Ok(Some(company))
    }

    async fn update_company(&self, id: i64, data: &CompanyData) -> Result<Company, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let company = tables
            .companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
        company.name = data.name.clone();
        company.location = data.location.clone();
        company.description = data.description.clone();
        company.employee_count = data.employee_count;
        if data.logo.is_some() {
            company.logo = data.logo.clone();
        }
        Ok(company.clone())
    }

    async fn list_vacancies(&self) -> Result<Vec<VacancyListing>, AppError> {
        Ok(self.tables.lock().unwrap().listings(|_| true))
    }

    async fn vacancies_by_specialty(
        &self,
        specialty_id: i64,
    ) -> Result<Vec<VacancyListing>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.listings(|v| v.specialty_id == Some(specialty_id)))
    }

    async fn vacancies_by_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<VacancyListing>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.listings(|v| v.company_id == company_id))
    }

    async fn find_vacancy(&self, id: i64) -> Result<Option<VacancyListing>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .vacancies
            .iter()
            .find(|v| v.id == id)
            .map(|v| tables.listing(v)))
    }

    async fn find_owned_vacancy(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Vacancy>, AppError> {
        let tables = self.tables.lock().unwrap();
        let Some(company) = tables.companies.iter().find(|c| c.owner_id == owner_id) else {
            return Ok(None);
        };
        Ok(tables
            .vacancies
            .iter()
            .find(|v| v.id == id && v.company_id == company.id)
            .cloned())
    }

    async fn create_vacancy(
        &self,
        company_id: i64,
        data: &VacancyData,
    ) -> Result<Vacancy, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.vacancies.len() as i64 + 1;
        // Deterministic, strictly increasing timestamps keep "newest first" stable.
        let published_at =
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::minutes(id);
        let vacancy = Vacancy {
            id,
            company_id,
            specialty_id: data.specialty_id,
            title: data.title.clone(),
            skills: data.skills.clone(),
            description: data.description.clone(),
            salary_min: data.salary_min,
            salary_max: data.salary_max,
            published_at,
        };
        tables.vacancies.push(vacancy.clone());
        Ok(vacancy)
    }

    async fn update_vacancy(&self, id: i64, data: &VacancyData) -> Result<Vacancy, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let vacancy = tables
            .vacancies
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
        vacancy.specialty_id = data.specialty_id;
        vacancy.title = data.title.clone();
        vacancy.skills = data.skills.clone();
        vacancy.description = data.description.clone();
        vacancy.salary_min = data.salary_min;
        vacancy.salary_max = data.salary_max;
        Ok(vacancy.clone())
    }

    async fn create_application(
        &self,
        vacancy_id: i64,
        user_id: i64,
        data: &ApplicationData,
    ) -> Result<Application, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let application = Application {
            id: tables.applications.len() as i64 + 1,
            vacancy_id,
            user_id,
            written_username: data.written_username.clone(),
            written_phone: data.written_phone.clone(),
            written_cover_letter: data.written_cover_letter.clone(),
            created_at: Utc::now(),
        };
        tables.applications.push(application.clone());
        Ok(application)
    }
}
