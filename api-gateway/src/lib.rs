//! HTTP surface of the bank ledger
//!
//! Builds the axum router over an [`AccountService`]. All routes except
//! `POST /account` run behind customer resolution.

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use account_service::AccountService;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;

use crate::api::{account, operation, resolve_customer, statement};

/// App state shared across handlers
pub struct AppState {
    /// Ledger of customer accounts
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Wrap a ledger for use as router state
    pub fn new(account_service: Arc<AccountService>) -> Arc<Self> {
        Arc::new(Self { account_service })
    }
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Account routes
        api::account::create_account,
        api::account::get_account,
        api::account::update_account,
        api::account::delete_account,
        // Operation routes
        api::operation::deposit,
        api::operation::withdraw,
        // Statement routes
        api::statement::get_statement,
        api::statement::get_statement_by_date,
        api::statement::get_balance,
    ),
    components(
        schemas(
            api::account::CreateAccountRequest,
            api::account::UpdateAccountRequest,
            api::operation::DepositRequest,
            api::operation::WithdrawRequest,
            api::statement::BalanceResponse,
            common::model::account::Account,
            common::model::account::Operation,
            common::model::account::OperationType,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "account", description = "Account lifecycle endpoints"),
        (name = "operation", description = "Deposit and withdrawal endpoints"),
        (name = "statement", description = "Statement and balance endpoints")
    ),
    info(
        title = "Bank Ledger API",
        version = "1.0.0",
        description = "In-memory bank accounts identified by tax id"
    )
)]
pub struct ApiDoc;

/// Build the ledger router with its middleware stack
pub fn create_router(state: Arc<AppState>, log_level: Level) -> Router {
    let resolve = middleware::from_fn_with_state(state.clone(), resolve_customer);

    // Every ledger route except account creation needs a resolved customer
    let ledger_routes = Router::new()
        .route(
            "/account",
            post(account::create_account).merge(
                get(account::get_account)
                    .put(account::update_account)
                    .delete(account::delete_account)
                    .route_layer(resolve.clone()),
            ),
        )
        .route("/deposit", post(operation::deposit).route_layer(resolve.clone()))
        .route("/withdraw", post(operation::withdraw).route_layer(resolve.clone()))
        .route("/statement", get(statement::get_statement).route_layer(resolve.clone()))
        .route(
            "/statement/date",
            get(statement::get_statement_by_date).route_layer(resolve.clone()),
        )
        .route("/balance", get(statement::get_balance).route_layer(resolve));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(ledger_routes)
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(log_level))
                        .on_request(DefaultOnRequest::new().level(log_level))
                        .on_response(DefaultOnResponse::new().level(log_level)),
                )
                .layer(cors),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
