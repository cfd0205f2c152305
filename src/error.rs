//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The message sent to the client when an unexpected error occurs.
///
/// Internal details are only written to the server logs.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid combination of email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The auth cookie is missing from the cookie jar in the request.
    #[error("no auth cookie in the cookie jar")]
    CookieMissing,

    /// The auth cookie could not be decoded into a token.
    #[error("the auth token could not be read: {0}")]
    InvalidToken(String),

    /// The auth token has expired and the user must log in again.
    #[error("the auth token has expired")]
    TokenExpired,

    /// There was an error formatting the expiry date of the auth token.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not format the auth token: {0}")]
    InvalidDateFormat(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email address given during registration is not a valid email address.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// The email address given during registration belongs to an existing user.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// An empty string was used for a user's name.
    #[error("Name cannot be empty")]
    EmptyUserName,

    /// An empty string was used for a transaction name.
    #[error("Transaction name cannot be empty")]
    EmptyTransactionName,

    /// A zero, negative or non-finite number was used for a transaction amount.
    #[error("Amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a transaction that does not exist or belongs to
    /// another user.
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// The request body could not be read as the expected JSON.
    #[error("{message}")]
    InvalidJson {
        /// The status code axum chose for the rejection.
        status: StatusCode,
        /// Why the body was rejected.
        message: String,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Extracts a JSON request body like [axum::Json], but a body that is missing,
/// malformed or the wrong shape gets a JSON `{"msg": ...}` error response.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Build a JSON response of the form `{"msg": message}`.
pub(crate) fn message_response(status_code: StatusCode, message: &str) -> Response {
    (status_code, Json(json!({ "msg": message }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::EmptyTransactionName
            | Error::NonPositiveAmount(_)
            | Error::EmptyUserName
            | Error::InvalidEmail(_)
            | Error::TooWeak(_) => message_response(StatusCode::BAD_REQUEST, &self.to_string()),
            Error::InvalidCredentials => {
                message_response(StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            Error::CookieMissing | Error::InvalidToken(_) | Error::TokenExpired => {
                message_response(StatusCode::UNAUTHORIZED, "Not authenticated, please log in")
            }
            Error::DeleteMissingTransaction => {
                message_response(StatusCode::NOT_FOUND, "Transaction not found")
            }
            Error::NotFound => message_response(StatusCode::NOT_FOUND, "Not found"),
            Error::InvalidJson { status, ref message } => message_response(status, message),
            Error::DuplicateEmail => message_response(
                StatusCode::CONFLICT,
                "An account with this email address already exists",
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                message_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` and return everything it logged.
    fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    async fn response_parts(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let (status, body) = response_parts(Error::DeleteMissingTransaction).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Transaction not found");
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let (status, body) = response_parts(Error::NonPositiveAmount(0.0)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["msg"].as_str().unwrap().contains("positive"),
            "got message {body}"
        );
    }

    #[tokio::test]
    async fn sql_errors_do_not_leak_details() {
        let (status, body) =
            response_parts(Error::SqlError(rusqlite::Error::InvalidQuery)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["msg"], "Server Error");
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn sql_error_is_logged_once_when_turned_into_response() {
        let logs = capture_logs(|| {
            let error = Error::from(rusqlite::Error::InvalidQuery);
            let _ = error.into_response();
        });

        assert_eq!(logs.matches("ERROR").count(), 1, "got logs:\n{logs}");
    }

    #[tokio::test]
    async fn invalid_json_keeps_rejection_status() {
        let (status, body) = response_parts(Error::InvalidJson {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `ids`".to_owned(),
        })
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["msg"], "missing field `ids`");
    }
}
