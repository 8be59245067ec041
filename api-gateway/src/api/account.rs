//! Account API handlers
//!
//! Handles endpoints related to the account lifecycle:
//! - Create account
//! - Get account details
//! - Rename account
//! - Delete account

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use common::model::account::Account;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::customer::Customer;
use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Create account request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Tax identifier, unique per account
    #[serde(alias = "cpf")]
    pub tax_id: String,
    /// Display name
    pub name: String,
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/account",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account successfully created"),
        (status = 400, description = "Customer already exists", body = ErrorResponse)
    ),
    tag = "account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<StatusCode, ApiError> {
    state.account_service.create_account(&request.tax_id, &request.name).await?;
    Ok(StatusCode::CREATED)
}

/// Get the resolved account
#[utoipa::path(
    get,
    path = "/account",
    params(
        ("taxId" = String, Header, description = "Customer tax id")
    ),
    responses(
        (status = 200, description = "Account details", body = Account),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(Customer(customer)): Extension<Customer>,
) -> Result<Json<Account>, ApiError> {
    let account = state.account_service.get_account(&customer).await?;
    Ok(Json(account))
}

/// Rename account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    /// New display name
    pub name: String,
}

/// Rename the resolved account
#[utoipa::path(
    put,
    path = "/account",
    params(
        ("taxId" = String, Header, description = "Customer tax id")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 201, description = "Account renamed"),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "account"
)]
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Extension(Customer(customer)): Extension<Customer>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<StatusCode, ApiError> {
    state.account_service.rename_account(&customer, &request.name).await?;
    Ok(StatusCode::CREATED)
}

/// Delete the resolved account
#[utoipa::path(
    delete,
    path = "/account",
    params(
        ("taxId" = String, Header, description = "Customer tax id")
    ),
    responses(
        (status = 200, description = "Remaining accounts", body = [Account]),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "account"
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(Customer(customer)): Extension<Customer>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let remaining = state.account_service.delete_account(&customer).await?;
    Ok(Json(remaining))
}
