/*
 * Responsibility
 * - POST /seed: reset the collection to the demo fixtures
 * - clears every record and creates the fixtures in order, as one storage step
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{dto::expenses::ExpenseDetail, handlers::expenses::row_to_detail},
    error::AppError,
    repos::ExpenseFields,
    state::AppState,
};

fn fixture(title: &str, description: &str, amount: &str, date: &str, category: &str) -> ExpenseFields {
    ExpenseFields {
        title: title.to_string(),
        description: description.to_string(),
        amount: amount.to_string(),
        date: date.to_string(),
        category: category.to_string(),
    }
}

pub fn fixtures() -> Vec<ExpenseFields> {
    vec![
        fixture("Boodschappen", "Albert Heijn", "45.30", "2026-01-19", "Food"),
        fixture("Treinkaartje", "Retour Rotterdam", "12.50", "2026-01-18", "Travel"),
        fixture(
            "Netflix Abonnement",
            "Maandelijkse kosten",
            "14.50",
            "2026-01-19",
            "Entertainment",
        ),
    ]
}

pub async fn seed(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<ExpenseDetail>>), AppError> {
    let rows = state.store.replace_all(&fixtures()).await?;

    let mut created = Vec::with_capacity(rows.len());
    for row in rows {
        created.push(row_to_detail(&state, row)?);
    }

    tracing::info!(count = created.len(), backend = state.store.backend_name(), "seeded expenses");
    Ok((StatusCode::CREATED, Json(created)))
}
