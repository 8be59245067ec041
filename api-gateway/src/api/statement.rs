//! Statement and balance handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use common::decimal::Amount;
use common::model::account::Operation;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::customer::Customer;
use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Get the full statement of the resolved account
#[utoipa::path(
    get,
    path = "/statement",
    params(
        ("taxId" = String, Header, description = "Customer tax id")
    ),
    responses(
        (status = 200, description = "Statement in chronological order", body = [Operation]),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "statement"
)]
pub async fn get_statement(
    State(state): State<Arc<AppState>>,
    Extension(Customer(customer)): Extension<Customer>,
) -> Result<Json<Vec<Operation>>, ApiError> {
    let statement = state.account_service.get_statement(&customer).await?;
    Ok(Json(statement))
}

/// Statement by date query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatementDateQuery {
    /// Calendar day as `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Get the operations recorded on one calendar day
#[utoipa::path(
    get,
    path = "/statement/date",
    params(
        ("taxId" = String, Header, description = "Customer tax id"),
        StatementDateQuery
    ),
    responses(
        (status = 200, description = "Operations created on the requested day", body = [Operation]),
        (status = 400, description = "Customer not found or invalid date", body = ErrorResponse)
    ),
    tag = "statement"
)]
pub async fn get_statement_by_date(
    State(state): State<Arc<AppState>>,
    Extension(Customer(customer)): Extension<Customer>,
    Query(query): Query<StatementDateQuery>,
) -> Result<Json<Vec<Operation>>, ApiError> {
    let date = query
        .date
        .ok_or_else(|| ApiError::BadRequest("Missing date query parameter".to_string()))?;

    let statement = state.account_service.get_statement_by_date(&customer, &date).await?;
    Ok(Json(statement))
}

/// Balance serialized as a bare JSON number
#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = f64)]
pub struct BalanceResponse(#[serde(with = "rust_decimal::serde::float")] pub Amount);

/// Get the balance of the resolved account
#[utoipa::path(
    get,
    path = "/balance",
    params(
        ("taxId" = String, Header, description = "Customer tax id")
    ),
    responses(
        (status = 200, description = "Credits minus debits", body = BalanceResponse),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "statement"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Extension(Customer(customer)): Extension<Customer>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.account_service.get_balance(&customer).await?;
    Ok(Json(BalanceResponse(balance)))
}
