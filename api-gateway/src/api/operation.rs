//! Deposit and withdrawal handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use common::decimal::Amount;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::customer::Customer;
use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Deposit request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DepositRequest {
    /// Free text shown on the statement
    #[serde(default)]
    pub description: Option<String>,
    /// Amount
    #[schema(value_type = f64)]
    pub amount: Amount,
}

/// Deposit funds into the resolved account
#[utoipa::path(
    post,
    path = "/deposit",
    params(
        ("taxId" = String, Header, description = "Customer tax id")
    ),
    request_body = DepositRequest,
    responses(
        (status = 201, description = "Credit recorded"),
        (status = 400, description = "Customer not found or invalid amount", body = ErrorResponse)
    ),
    tag = "operation"
)]
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Extension(Customer(customer)): Extension<Customer>,
    Json(request): Json<DepositRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .account_service
        .deposit(&customer, request.amount, request.description)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Withdraw request
#[derive(Debug, Deserialize, ToSchema)]
pub struct WithdrawRequest {
    /// Amount
    #[schema(value_type = f64)]
    pub amount: Amount,
    /// Free text shown on the statement
    #[serde(default)]
    pub description: Option<String>,
}

/// Withdraw funds from the resolved account
#[utoipa::path(
    post,
    path = "/withdraw",
    params(
        ("taxId" = String, Header, description = "Customer tax id")
    ),
    request_body = WithdrawRequest,
    responses(
        (status = 201, description = "Debit recorded"),
        (status = 400, description = "Customer not found or insufficient funds", body = ErrorResponse)
    ),
    tag = "operation"
)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    Extension(Customer(customer)): Extension<Customer>,
    Json(request): Json<WithdrawRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .account_service
        .withdraw(&customer, request.amount, request.description)
        .await?;
    Ok(StatusCode::CREATED)
}
