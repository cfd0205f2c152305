use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    error::message_response,
    transaction::{TransactionId, TransactionState},
    user::UserID,
};

/// A route handler for deleting one of the authenticated user's transactions.
///
/// An ID that is not a number cannot refer to a stored transaction, so it is
/// treated the same as an ID that does not exist.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(raw_transaction_id): Path<String>,
) -> Response {
    let Ok(transaction_id) = raw_transaction_id.parse::<TransactionId>() else {
        tracing::debug!("User {user_id} tried to delete malformed ID {raw_transaction_id:?}");
        return Error::DeleteMissingTransaction.into_response();
    };

    match state.service().delete_one(user_id, transaction_id) {
        Ok(()) => message_response(StatusCode::OK, "Transaction deleted successfully"),
        Err(error @ Error::DeleteMissingTransaction) => error.into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}
