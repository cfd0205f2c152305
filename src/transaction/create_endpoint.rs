//! Defines the endpoint for recording a new transaction.

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    error::ApiJson,
    transaction::{NewTransaction, TransactionState, TransactionType},
    user::UserID,
};

/// The JSON body of a create transaction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// What the transaction was for.
    pub name: String,
    /// The amount of money, must be greater than zero.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// A route handler for creating a transaction owned by the authenticated user.
///
/// Responds with the created transaction as JSON.
///
/// # Errors
/// Responds with a 400 if the name is empty or the amount is not a positive
/// number and with a 500 if the transaction could not be stored.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    ApiJson(request): ApiJson<CreateTransactionRequest>,
) -> Response {
    let new_transaction = match NewTransaction::new(&request.name, request.amount, request.kind) {
        Ok(new_transaction) => new_transaction,
        Err(error) => {
            tracing::debug!("Rejected new transaction from user {user_id}: {error}");
            return error.into_response();
        }
    };

    state
        .service()
        .add(user_id, new_transaction)
        .map(Json)
        .map_err(|error: Error| {
            tracing::error!("Could not create transaction for user {user_id}: {error}");
            error
        })
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{Extension, extract::State, http::StatusCode};

    use crate::{
        error::ApiJson,
        test_utils::{get_test_connection, insert_test_user, parse_json_body},
        transaction::{TransactionState, TransactionType},
    };

    use super::{CreateTransactionRequest, create_transaction_endpoint};

    fn request(
        name: &str,
        amount: f64,
        kind: TransactionType,
    ) -> ApiJson<CreateTransactionRequest> {
        ApiJson(CreateTransactionRequest {
            name: name.to_owned(),
            amount,
            kind,
        })
    }

    #[tokio::test]
    async fn creates_transaction() {
        let connection = get_test_connection();
        let user_id = insert_test_user(&connection, "test@example.com");
        let state = TransactionState {
            db_connection: connection,
        };

        let response = create_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            request("Salary", 5000.0, TransactionType::Income),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body["name"], "Salary");
        assert_eq!(body["amount"], 5000.0);
        assert_eq!(body["type"], "income");
        assert_eq!(body["owner_id"], user_id.as_i64());
        assert_eq!(state.service().list(user_id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_zero_amount() {
        let connection = get_test_connection();
        let user_id = insert_test_user(&connection, "test@example.com");
        let state = TransactionState {
            db_connection: connection,
        };

        let response = create_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            request("Rent", 0.0, TransactionType::Expense),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.service().list(user_id), Ok(vec![]));
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let connection = get_test_connection();
        let user_id = insert_test_user(&connection, "test@example.com");
        let state = TransactionState {
            db_connection: connection,
        };

        let response = create_transaction_endpoint(
            State(state),
            Extension(user_id),
            request("   ", 10.0, TransactionType::Expense),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json_body(response).await;
        assert_eq!(body["msg"], "Transaction name cannot be empty");
    }
}
