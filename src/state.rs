//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::utils::code_generator::CodeGenerator;

/// Services shared by all handlers.
///
/// Handlers hold no state of their own between requests; everything durable
/// lives behind the repositories the services were built with.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    /// Read the client address from forwarding headers (see [`crate::config::Config::behind_proxy`]).
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services on top of the given store and code generator.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
        code_generator: Arc<dyn CodeGenerator>,
        base_url: impl Into<String>,
        behind_proxy: bool,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            link_repository.clone(),
            click_repository.clone(),
            code_generator,
            base_url,
        ));
        let redirect_service = Arc::new(RedirectService::new(link_repository, click_repository));

        Self {
            link_service,
            redirect_service,
            behind_proxy,
        }
    }
}
