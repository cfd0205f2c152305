use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiJson, message_response},
    transaction::{TransactionId, TransactionState},
    user::UserID,
};

/// The JSON body of a batch delete request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteManyRequest {
    /// The transactions to delete.
    pub ids: Vec<TransactionId>,
}

/// A route handler for deleting many of the authenticated user's transactions at once.
///
/// IDs that do not exist or belong to someone else are skipped, the response
/// is the same however many transactions were actually deleted.
pub async fn delete_many_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    ApiJson(request): ApiJson<DeleteManyRequest>,
) -> Response {
    match state.service().delete_many(user_id, &request.ids) {
        Ok(_) => message_response(StatusCode::OK, "Transactions deleted successfully"),
        Err(error) => {
            tracing::error!("Could not delete transactions for user {user_id}: {error}");
            error.into_response()
        }
    }
}
