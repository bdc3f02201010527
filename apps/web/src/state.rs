use std::sync::Arc;

use crate::config::Config;
use crate::media::LogoStorage;
use crate::render::Templates;
use crate::store::JobBoardStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Production: `PgStore`.
    pub store: Arc<dyn JobBoardStore>,
    /// Pluggable logo storage. Production: `S3LogoStorage`.
    pub logos: Arc<dyn LogoStorage>,
    pub templates: Templates,
    pub config: Config,
}
