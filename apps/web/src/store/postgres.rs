use async_trait::async_trait;
use sqlx::PgPool;

use super::JobBoardStore;
use crate::errors::AppError;
use crate::models::{
    Application, ApplicationData, Company, CompanyData, CompanyWithCount, Specialty,
    SpecialtyWithCount, User, Vacancy, VacancyData, VacancyListing,
};

const LISTING_SELECT: &str = r#"
    SELECT v.id, v.title, v.skills, v.description, v.salary_min, v.salary_max,
           v.published_at, v.company_id, c.name AS company_name, c.logo AS company_logo,
           v.specialty_id, s.title AS specialty_title
    FROM vacancies v
    JOIN companies c ON c.id = v.company_id
    LEFT JOIN specialties s ON s.id = v.specialty_id
"#;

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn listings(
        &self,
        filter: &str,
        bind: Option<i64>,
    ) -> Result<Vec<VacancyListing>, AppError> {
        let sql = format!("{LISTING_SELECT} {filter} ORDER BY v.published_at DESC, v.id DESC");
        let mut query = sqlx::query_as::<_, VacancyListing>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl JobBoardStore for PgStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>, AppError> {
        Ok(sqlx::query_as::<_, Specialty>("SELECT * FROM specialties ORDER BY id")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn specialties_with_counts(&self) -> Result<Vec<SpecialtyWithCount>, AppError> {
        Ok(sqlx::query_as::<_, SpecialtyWithCount>(
            r#"
            SELECT s.id, s.code, s.title, s.picture, COUNT(v.id) AS vacancy_count
            FROM specialties s
            LEFT JOIN vacancies v ON v.specialty_id = s.id
            GROUP BY s.id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_specialty_by_code(&self, code: &str) -> Result<Option<Specialty>, AppError> {
        Ok(
            sqlx::query_as::<_, Specialty>("SELECT * FROM specialties WHERE code = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn companies_with_counts(&self) -> Result<Vec<CompanyWithCount>, AppError> {
        Ok(sqlx::query_as::<_, CompanyWithCount>(
            r#"
            SELECT c.id, c.name, c.location, c.logo, COUNT(v.id) AS vacancy_count
            FROM companies c
            LEFT JOIN vacancies v ON v.company_id = c.id
            GROUP BY c.id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, AppError> {
        Ok(sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_company_by_owner(&self, owner_id: i64) -> Result<Option<Company>, AppError> {
        Ok(
            sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_company(
        &self,
        owner_id: i64,
        data: &CompanyData,
    ) -> Result<Option<Company>, AppError> {
        Ok(sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (owner_id, name, location, logo, description, employee_count)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (owner_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&data.name)
        .bind(&data.location)
        .bind(&data.logo)
        .bind(&data.description)
        .bind(data.employee_count)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_company(&self, id: i64, data: &CompanyData) -> Result<Company, AppError> {
        Ok(sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, location = $3, logo = COALESCE($4, logo),
                description = $5, employee_count = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.location)
        .bind(&data.logo)
        .bind(&data.description)
        .bind(data.employee_count)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_vacancies(&self) -> Result<Vec<VacancyListing>, AppError> {
        self.listings("", None).await
    }

    async fn vacancies_by_specialty(
        &self,
        specialty_id: i64,
    ) -> Result<Vec<VacancyListing>, AppError> {
        self.listings("WHERE v.specialty_id = $1", Some(specialty_id))
            .await
    }

    async fn vacancies_by_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<VacancyListing>, AppError> {
        self.listings("WHERE v.company_id = $1", Some(company_id))
            .await
    }

    async fn find_vacancy(&self, id: i64) -> Result<Option<VacancyListing>, AppError> {
        let sql = format!("{LISTING_SELECT} WHERE v.id = $1");
        Ok(sqlx::query_as::<_, VacancyListing>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_owned_vacancy(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Vacancy>, AppError> {
        Ok(sqlx::query_as::<_, Vacancy>(
            r#"
            SELECT v.*
            FROM vacancies v
            JOIN companies c ON c.id = v.company_id
            WHERE v.id = $1 AND c.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_vacancy(
        &self,
        company_id: i64,
        data: &VacancyData,
    ) -> Result<Vacancy, AppError> {
        Ok(sqlx::query_as::<_, Vacancy>(
            r#"
            INSERT INTO vacancies
                (company_id, specialty_id, title, skills, description, salary_min, salary_max)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(data.specialty_id)
        .bind(&data.title)
        .bind(&data.skills)
        .bind(&data.description)
        .bind(data.salary_min)
        .bind(data.salary_max)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_vacancy(&self, id: i64, data: &VacancyData) -> Result<Vacancy, AppError> {
        Ok(sqlx::query_as::<_, Vacancy>(
            r#"
            UPDATE vacancies
            SET specialty_id = $2, title = $3, skills = $4, description = $5,
                salary_min = $6, salary_max = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.specialty_id)
        .bind(&data.title)
        .bind(&data.skills)
        .bind(&data.description)
        .bind(data.salary_min)
        .bind(data.salary_max)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn create_application(
        &self,
        vacancy_id: i64,
        user_id: i64,
        data: &ApplicationData,
    ) -> Result<Application, AppError> {
        Ok(sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications
                (vacancy_id, user_id, written_username, written_phone, written_cover_letter)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(vacancy_id)
        .bind(user_id)
        .bind(&data.written_username)
        .bind(&data.written_phone)
        .bind(&data.written_cover_letter)
        .fetch_one(&self.pool)
        .await?)
    }
}
