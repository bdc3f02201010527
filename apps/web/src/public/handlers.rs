//! Axum route handlers for the public pages.

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::forms::{ApplicationInput, BoundForm, LogoFormat};
use crate::render;
use crate::routes::{parse_path_id, paths};
use crate::state::AppState;

const LOGO_CSP: &str = "default-src 'none'; sandbox";

/// GET /
///
/// Landing page: every specialty and company with its vacancy count.
pub async fn handle_home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let specialties = state.store.specialties_with_counts().await?;
    let companies = state.store.companies_with_counts().await?;

    state.templates.render(
        render::INDEX,
        context! {
            speciality_list => specialties,
            company_list => companies,
        },
    )
}

/// GET /vacancies
pub async fn handle_vacancies(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let vacancies = state.store.list_vacancies().await?;

    state.templates.render(
        render::VACANCIES,
        context! {
            count_vacancy => vacancies.len(),
            vacancies => vacancies,
        },
    )
}

/// GET /vacancies/cat/:code
pub async fn handle_vacancies_by_specialty(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Html<String>, AppError> {
    let specialty = state
        .store
        .find_specialty_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Specialty '{code}' not found")))?;

    let vacancies = state.store.vacancies_by_specialty(specialty.id).await?;

    state.templates.render(
        render::VACANCIES,
        context! {
            speciality_title => specialty.title,
            speciality_id => specialty.id,
            count_vacancy => vacancies.len(),
            vacancies => vacancies,
        },
    )
}

/// GET /companies/:id
pub async fn handle_company(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let company_id = parse_path_id(&raw_id)?;
    let company = state
        .store
        .find_company(company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;

    let vacancies = state.store.vacancies_by_company(company.id).await?;

    state.templates.render(
        render::COMPANY,
        context! {
            company_id => company.id,
            company_name => company.name,
            company_location => company.location,
            company_logo => company.logo,
            count_in_company => vacancies.len(),
            vacancies => vacancies,
        },
    )
}

/// GET /vacancies/:pk
///
/// Vacancy detail with an empty application form.
pub async fn handle_vacancy(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let vacancy_id = parse_path_id(&raw_id)?;
    let vacancy = state
        .store
        .find_vacancy(vacancy_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vacancy {vacancy_id} not found")))?;

    state.templates.render(
        render::VACANCY,
        context! {
            vacancy => vacancy,
            form => BoundForm::<ApplicationInput>::default(),
        },
    )
}

/// POST /vacancies/:pk
///
/// Records an application from the current user, then redirects to the
/// confirmation page. Invalid input re-renders the detail page with errors.
/// The vacancy is resolved before the user, so a missing vacancy is a 404
/// even for anonymous requests.
pub async fn handle_apply(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(raw_id): Path<String>,
    Form(input): Form<ApplicationInput>,
) -> Result<Response, AppError> {
    let vacancy_id = parse_path_id(&raw_id)?;
    let vacancy = state
        .store
        .find_vacancy(vacancy_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vacancy {vacancy_id} not found")))?;
    let Some(CurrentUser(user)) = user else {
        return Err(AppError::Unauthorized);
    };

    match input.clean() {
        Ok(data) => {
            let application = state
                .store
                .create_application(vacancy.id, user.id, &data)
                .await?;
            info!(
                "User {} applied to vacancy {} (application {})",
                user.id, vacancy.id, application.id
            );
            Ok(Redirect::to(&paths::send(vacancy.id)).into_response())
        }
        Err(errors) => {
            let page = state.templates.render(
                render::VACANCY,
                context! {
                    vacancy => vacancy,
                    form => BoundForm::with_errors(input, errors),
                },
            )?;
            Ok(page.into_response())
        }
    }
}

/// GET /vacancies/:pk/send
pub async fn handle_send(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let vacancy_id = parse_path_id(&raw_id)?;
    state
        .templates
        .render(render::SEND, context! { vacancy_id => vacancy_id })
}

/// GET /media/logos/:key
///
/// Objects are served inline only when their bytes are a supported raster
/// format matching the stored content type; anything else is a download.
pub async fn handle_logo(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let logo = state
        .logos
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Logo {key} not found")))?;

    let (content_type, disposition) = match LogoFormat::detect(&logo.data) {
        Some(format) if format.content_type() == logo.content_type => {
            (format.content_type(), "inline")
        }
        _ => {
            warn!("Logo {key} is not a recognised image, serving as attachment");
            ("application/octet-stream", "attachment")
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            (header::CONTENT_SECURITY_POLICY, LOGO_CSP),
        ],
        logo.data,
    )
        .into_response())
}
