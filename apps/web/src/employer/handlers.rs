//! Axum route handlers for the employer area.
//!
//! Lookups are always scoped to the current user: a company is found by its
//! owner and a vacancy only through the owner's company, so another
//! employer's records resolve to 404.

use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::forms::{BoundForm, CompanyInput, CompanySubmission, VacancyInput};
use crate::media::store_logo;
use crate::models::{Company, CompanyData, User};
use crate::render;
use crate::routes::{parse_path_id, paths};
use crate::state::AppState;

async fn owned_company(state: &AppState, user: &User) -> Result<Company, AppError> {
    state
        .store
        .find_company_by_owner(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} owns no company", user.id)))
}

/// Stores the logo from the submission, if any, and records its key on `data`.
async fn attach_logo(
    state: &AppState,
    submission: &CompanySubmission,
    data: &mut CompanyData,
) -> Result<(), AppError> {
    if let Some(upload) = &submission.logo {
        data.logo = Some(store_logo(state.logos.as_ref(), upload).await?);
    }
    Ok(())
}

fn render_company_form(
    state: &AppState,
    user: &User,
    company: Option<&Company>,
    form: BoundForm<CompanyInput>,
) -> Result<Response, AppError> {
    let page = state.templates.render(
        render::COMPANY_EDIT,
        context! {
            user => user,
            company => company,
            form => form,
        },
    )?;
    Ok(page.into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Company profile
// ────────────────────────────────────────────────────────────────────────────

/// GET /my-company/start
///
/// "Create your company" landing. Existing owners go straight to their profile.
pub async fn handle_company_start(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    if state.store.find_company_by_owner(user.id).await?.is_some() {
        return Ok(Redirect::to(paths::MY_COMPANY).into_response());
    }

    let page = state
        .templates
        .render(render::COMPANY_CREATE, context! { user => user })?;
    Ok(page.into_response())
}

/// GET /my-company/create
pub async fn handle_company_create_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    if state.store.find_company_by_owner(user.id).await?.is_some() {
        return Ok(Redirect::to(paths::MY_COMPANY).into_response());
    }

    render_company_form(&state, &user, None, BoundForm::default())
}

/// POST /my-company/create
pub async fn handle_company_create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Response, AppError> {
    if state.store.find_company_by_owner(user.id).await?.is_some() {
        return Ok(Redirect::to(paths::MY_COMPANY).into_response());
    }

    let submission = CompanySubmission::from_multipart(multipart).await?;
    match submission.clean(state.config.max_logo_bytes) {
        Ok(mut data) => {
            // A concurrent submit may have created the company since the check above.
            let Some(company) = state.store.create_company(user.id, &data).await? else {
                info!("User {} already owns a company, create ignored", user.id);
                return Ok(Redirect::to(paths::MY_COMPANY).into_response());
            };
            // The logo is stored only once the row exists.
            if submission.logo.is_some() {
                attach_logo(&state, &submission, &mut data).await?;
                state.store.update_company(company.id, &data).await?;
            }
            info!("User {} created company {} ({})", user.id, company.id, company.name);
            Ok(Redirect::to(paths::MY_COMPANY).into_response())
        }
        Err(errors) => render_company_form(
            &state,
            &user,
            None,
            BoundForm::with_errors(submission.input, errors),
        ),
    }
}

/// GET /my-company
///
/// Edit form pre-filled from the owned company; users without one are sent
/// to the create landing.
pub async fn handle_my_company(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let Some(company) = state.store.find_company_by_owner(user.id).await? else {
        return Ok(Redirect::to(paths::COMPANY_EDIT).into_response());
    };

    let form = BoundForm::unbound(CompanyInput::from_company(&company));
    render_company_form(&state, &user, Some(&company), form)
}

/// POST /my-company
pub async fn handle_my_company_update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let Some(company) = state.store.find_company_by_owner(user.id).await? else {
        return Ok(Redirect::to(paths::COMPANY_EDIT).into_response());
    };

    let submission = CompanySubmission::from_multipart(multipart).await?;
    match submission.clean(state.config.max_logo_bytes) {
        Ok(mut data) => {
            attach_logo(&state, &submission, &mut data).await?;
            state.store.update_company(company.id, &data).await?;
            info!("User {} updated company {}", user.id, company.id);
            Ok(Redirect::to(paths::MY_COMPANY).into_response())
        }
        Err(errors) => render_company_form(
            &state,
            &user,
            Some(&company),
            BoundForm::with_errors(submission.input, errors),
        ),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Company vacancies
// ────────────────────────────────────────────────────────────────────────────

/// GET /my-company/vacancies
pub async fn handle_company_vacancies(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let company = owned_company(&state, &user).await?;
    let vacancies = state.store.vacancies_by_company(company.id).await?;

    state.templates.render(
        render::COMPANY_VACANCY_LIST,
        context! {
            user => user,
            company => company,
            vacancy_list => vacancies,
        },
    )
}

/// GET /my-company/vacancies/create
pub async fn handle_vacancy_create_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let company = owned_company(&state, &user).await?;
    let specialties = state.store.list_specialties().await?;

    state.templates.render(
        render::COMPANY_VACANCY_EDIT,
        context! {
            user => user,
            company => company,
            specialties => specialties,
            form => BoundForm::<VacancyInput>::default(),
        },
    )
}

/// POST /my-company/vacancies/create
pub async fn handle_vacancy_create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(input): Form<VacancyInput>,
) -> Result<Response, AppError> {
    let company = owned_company(&state, &user).await?;
    let specialties = state.store.list_specialties().await?;

    match input.clean(&specialties) {
        Ok(data) => {
            let vacancy = state.store.create_vacancy(company.id, &data).await?;
            info!("Company {} published vacancy {}", company.id, vacancy.id);
            Ok(Redirect::to(paths::COMPANY_VACANCIES).into_response())
        }
        Err(errors) => {
            let page = state.templates.render(
                render::COMPANY_VACANCY_EDIT,
                context! {
                    user => user,
                    company => company,
                    specialties => specialties,
                    form => BoundForm::with_errors(input, errors),
                },
            )?;
            Ok(page.into_response())
        }
    }
}

/// GET /my-company/vacancies/:vacancy_id
pub async fn handle_vacancy_edit_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let vacancy_id = parse_path_id(&raw_id)?;
    let vacancy = state
        .store
        .find_owned_vacancy(vacancy_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vacancy {vacancy_id} not owned by user")))?;
    let specialties = state.store.list_specialties().await?;

    state.templates.render(
        render::VACANCY_EDIT,
        context! {
            user => user,
            specialties => specialties,
            form => BoundForm::unbound(VacancyInput::from_vacancy(&vacancy)),
            vacancy => vacancy,
        },
    )
}

/// POST /my-company/vacancies/:vacancy_id
pub async fn handle_vacancy_update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(raw_id): Path<String>,
    Form(input): Form<VacancyInput>,
) -> Result<Response, AppError> {
    let vacancy_id = parse_path_id(&raw_id)?;
    let vacancy = state
        .store
        .find_owned_vacancy(vacancy_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vacancy {vacancy_id} not owned by user")))?;
    let specialties = state.store.list_specialties().await?;

    match input.clean(&specialties) {
        Ok(data) => {
            state.store.update_vacancy(vacancy.id, &data).await?;
            info!("User {} updated vacancy {}", user.id, vacancy.id);
            Ok(Redirect::to(paths::COMPANY_VACANCIES).into_response())
        }
        Err(errors) => {
            let page = state.templates.render(
                render::VACANCY_EDIT,
                context! {
                    user => user,
                    specialties => specialties,
                    vacancy => vacancy,
                    form => BoundForm::with_errors(input, errors),
                },
            )?;
            Ok(page.into_response())
        }
    }
}
