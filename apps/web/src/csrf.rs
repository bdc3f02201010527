//! Cross-site request forgery guard.
//!
//! Every unsafe request must come from this site. The `Origin` header (or
//! `Referer` when the browser sends no `Origin`) has to name the host the
//! request was addressed to, or one of `Config::csrf_trusted_hosts`.
//! Requests carrying neither header are not browser form posts and pass.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method, Uri},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

pub async fn require_same_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_safe(request.method()) {
        return Ok(next.run(request).await);
    }

    let request_host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()));

    if let Some(source) = foreign_source(
        request.headers(),
        request_host,
        &state.config.csrf_trusted_hosts,
    ) {
        warn!(
            "Rejecting cross-site {} {} from {source:?}",
            request.method(),
            request.uri().path()
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

fn is_safe(method: &Method) -> bool {
    [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE].contains(method)
}

/// The `Origin`/`Referer` value when it names a site other than this one.
fn foreign_source(
    headers: &HeaderMap,
    request_host: Option<&str>,
    trusted_hosts: &[String],
) -> Option<String> {
    let source = headers
        .get(header::ORIGIN)
        .or_else(|| headers.get(header::REFERER))?;
    let source = source.to_str().unwrap_or_default();

    // `Origin: null` and unparsable values have no authority.
    let authority = source
        .parse::<Uri>()
        .ok()
        .and_then(|uri| uri.authority().map(|a| a.as_str().to_ascii_lowercase()));

    let allowed = authority.is_some_and(|authority| {
        request_host.is_some_and(|host| host.eq_ignore_ascii_case(&authority))
            || trusted_hosts.iter().any(|t| t.eq_ignore_ascii_case(&authority))
    });

    (!allowed).then(|| source.to_string())
}
