use std::sync::Arc;

use crate::application::pipeline::MailRouting;
use crate::application::relay::MailRelay;
use crate::catalog::client::CatalogClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogClient,
    /// Pluggable relay. Default: `HttpMailRelay` against `MAIL_RELAY_URL`.
    pub relay: Arc<dyn MailRelay>,
    /// Sender and recruiter list, derived from config once at startup.
    pub routing: MailRouting,
}
