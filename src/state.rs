/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 *   - store: ExpenseStore, id_codec: IdCodec, auth: AuthService, links: LinkBuilder
 * - Clone is cheap (Arc / small values inside)
 */
use std::sync::Arc;

use crate::config::ResponseShapes;
use crate::repos::ExpenseStore;
use crate::services::{auth::AuthService, id_codec::IdCodec, links::LinkBuilder};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ExpenseStore>,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
    pub links: LinkBuilder,
    pub shapes: ResponseShapes,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ExpenseStore>,
        id_codec: IdCodec,
        auth: Arc<AuthService>,
        links: LinkBuilder,
        shapes: ResponseShapes,
    ) -> Self {
        Self {
            store,
            id_codec,
            auth,
            links,
            shapes,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("id_codec", &self.id_codec)
            .field("auth", &self.auth)
            .field("links", &self.links)
            .field("shapes", &self.shapes)
            .finish()
    }
}
