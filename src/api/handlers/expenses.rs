/*
 * Responsibility
 * - /expenses CRUD handlers
 * - the path id is a public id; the extractor decodes it into the internal id
 * - the list handler is the only caller of the pagination engine
 * - each handler performs at most one storage mutation
 */
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::{
        dto::expenses::{
            CollectionOnlyLinks, DeletedResponse, ExpenseDetail, ExpenseListItem,
            ExpenseListResponse, ExpenseRequest,
        },
        extractors::{ExpenseId, JsonBody, PageQuery},
    },
    error::AppError,
    repos::ExpenseRow,
    services::pagination::PageWindow,
    state::AppState,
};

pub(crate) fn row_to_detail(state: &AppState, row: ExpenseRow) -> Result<ExpenseDetail, AppError> {
    let public_id = state.id_codec.encode(row.expense_id)?;
    Ok(ExpenseDetail::new(public_id, row, &state.links))
}

fn row_to_list_item(state: &AppState, row: ExpenseRow) -> Result<ExpenseListItem, AppError> {
    let public_id = state.id_codec.encode(row.expense_id)?;
    Ok(ExpenseListItem::new(
        public_id,
        row,
        &state.links,
        state.shapes.list_item_description,
    ))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    PageQuery(page): PageQuery,
) -> Result<Json<ExpenseListResponse>, AppError> {
    let total_items = state.store.count().await?;
    let window = PageWindow::compute(page, total_items)?;

    let rows = state.store.find(window.offset(), window.limit).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(row_to_list_item(&state, row)?);
    }

    tracing::debug!(
        page = window.current_page,
        limit = ?window.limit,
        total_items,
        items = items.len(),
        expected = window.expected_items(),
        "listed expenses"
    );

    Ok(Json(ExpenseListResponse::new(items, &window, &state.links)))
}

pub async fn get_expense(
    State(state): State<AppState>,
    expense_id: ExpenseId,
) -> Result<Json<ExpenseDetail>, AppError> {
    let row = state
        .store
        .find_by_id(expense_id.id)
        .await?
        .ok_or(AppError::not_found("Expense"))?;

    Ok(Json(row_to_detail(&state, row)?))
}

pub async fn create_expense(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseDetail>), AppError> {
    let fields = req.validate()?;

    let row = state.store.create(&fields).await?;

    let res = row_to_detail(&state, row)?;
    tracing::info!(id = %res.id, "expense created");
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn update_expense(
    State(state): State<AppState>,
    expense_id: ExpenseId,
    JsonBody(req): JsonBody<ExpenseRequest>,
) -> Result<Json<ExpenseDetail>, AppError> {
    // Full replace only: nothing is written unless all five fields are valid
    let fields = req.validate()?;

    let row = state
        .store
        .update_by_id(expense_id.id, &fields)
        .await?
        .ok_or(AppError::not_found("Expense"))?;

    Ok(Json(row_to_detail(&state, row)?))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    expense_id: ExpenseId,
) -> Result<Response, AppError> {
    state
        .store
        .delete_by_id(expense_id.id)
        .await?
        .ok_or(AppError::not_found("Expense"))?;

    tracing::info!(id = expense_id.id, "expense deleted");

    if state.shapes.delete_returns_body {
        let body = DeletedResponse {
            message: "Expense deleted",
            links: CollectionOnlyLinks {
                collection: state.links.collection(),
            },
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    } else {
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
