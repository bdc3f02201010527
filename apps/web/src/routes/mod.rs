pub mod health;


use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::csrf;
use crate::employer::handlers as employer;
use crate::errors::{server_error_response, AppError};
use crate::public::handlers as public;
use crate::state::AppState;

/// Room for the text fields of a multipart company form next to the logo.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Redirect targets.
pub mod paths {
    pub const MY_COMPANY: &str = "/my-company";
    pub const COMPANY_EDIT: &str = "/my-company/start";
    pub const COMPANY_VACANCIES: &str = "/my-company/vacancies";

    pub fn send(vacancy_id: i64) -> String {
        format!("/vacancies/{vacancy_id}/send")
    }
}

/// Integer path segments that fail to parse cannot name a record.
pub(crate) fn parse_path_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::NotFound(format!("'{raw}' is not a record id")))
}

async fn not_found() -> impl IntoResponse {
    AppError::NotFound("no route".to_string())
}

fn handle_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    server_error_response()
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_logo_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Public pages
        .route("/", get(public::handle_home))
        .route("/vacancies", get(public::handle_vacancies))
        .route(
            "/vacancies/cat/:code",
            get(public::handle_vacancies_by_specialty),
        )
        .route("/companies/:id", get(public::handle_company))
        .route(
            "/vacancies/:pk",
            get(public::handle_vacancy).post(public::handle_apply),
        )
        .route("/vacancies/:pk/send", get(public::handle_send))
        .route("/media/logos/:key", get(public::handle_logo))
        // Employer area
        .route("/my-company/start", get(employer::handle_company_start))
        .route(
            "/my-company/create",
            get(employer::handle_company_create_form).post(employer::handle_company_create),
        )
        .route(
            "/my-company",
            get(employer::handle_my_company).post(employer::handle_my_company_update),
        )
        .route(
            "/my-company/vacancies",
            get(employer::handle_company_vacancies),
        )
        .route(
            "/my-company/vacancies/create",
            get(employer::handle_vacancy_create_form).post(employer::handle_vacancy_create),
        )
        .route(
            "/my-company/vacancies/:vacancy_id",
            get(employer::handle_vacancy_edit_form).post(employer::handle_vacancy_update),
        )
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            csrf::require_same_origin,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
