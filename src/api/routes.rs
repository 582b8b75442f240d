/*
 * Responsibility
 * - URL structure of the service
 * - one collection path + one item path, each with OPTIONS and a 405 fallback
 * - auth guards are attached per path here (route_layer on the method router)
 * - unknown paths answer 404 with the JSON error body
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    auth::{login, secure},
    expenses::{create_expense, delete_expense, get_expense, list_expenses, update_expense},
    health::{health, root},
    methods::{
        collection_not_allowed, collection_options, item_not_allowed, item_options,
        login_not_allowed, secure_not_allowed, seed_not_allowed,
    },
    not_found,
    seed::seed,
};
use crate::middleware::auth::{basic, bearer};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/login",
            basic::guard(post(login), state.clone()).fallback(login_not_allowed),
        )
        .route(
            "/secure",
            bearer::guard(get(secure), state).fallback(secure_not_allowed),
        )
        .route("/seed", post(seed).fallback(seed_not_allowed))
        .route(
            "/expenses",
            get(list_expenses)
                .post(create_expense)
                .options(collection_options)
                .fallback(collection_not_allowed),
        )
        .route(
            "/expenses/{expense_id}",
            get(get_expense)
                .put(update_expense)
                .delete(delete_expense)
                .options(item_options)
                .fallback(item_not_allowed),
        )
        .fallback(not_found)
}
