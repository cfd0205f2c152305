use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{transaction::TransactionState, user::UserID};

/// A route handler that responds with every transaction the authenticated user owns.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    match state.service().list(user_id) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("Could not list transactions for user {user_id}: {error}");
            error.into_response()
        }
    }
}
