//! Customer resolution
//!
//! Maps the caller-supplied tax id header to a live account before the
//! handler runs. Requests naming an unknown tax id are rejected here.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use common::error::Error;
use common::model::account::Account;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the caller's tax id
pub const TAX_ID_HEADER: &str = "taxid";
/// Older header name still accepted for the tax id
pub const CPF_HEADER: &str = "cpf";

/// Account resolved from the request headers
#[derive(Debug, Clone)]
pub struct Customer(pub Account);

/// Read the tax id from the request headers
pub fn tax_id_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TAX_ID_HEADER)
        .or_else(|| headers.get(CPF_HEADER))
        .and_then(|value| value.to_str().ok())
}

/// Customer resolution middleware
pub async fn resolve_customer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let tax_id = tax_id_from_headers(request.headers())
        .ok_or_else(|| Error::CustomerNotFound("Missing taxId header".to_string()))?
        .to_string();

    let account = state.account_service.find_customer(&tax_id).await?;
    debug!("Resolved tax id {} to account {}", tax_id, account.id);

    request.extensions_mut().insert(Customer(account));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_tax_id_header_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(tax_id_from_headers(&headers), None);

        headers.insert(CPF_HEADER, HeaderValue::from_static("222"));
        assert_eq!(tax_id_from_headers(&headers), Some("222"));

        headers.insert(TAX_ID_HEADER, HeaderValue::from_static("111"));
        assert_eq!(tax_id_from_headers(&headers), Some("111"));
    }
}
