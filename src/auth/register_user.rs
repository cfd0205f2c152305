//! The registration endpoint for creating a new user account.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error, PasswordHash, ValidatedPassword,
    auth::set_auth_cookie,
    error::ApiJson,
    user::{Email, User, UserProfile, create_user},
};

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

/// The details a new user signs up with.
#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Create a new user and log them in.
///
/// Responds with the new user's public details as JSON and sets the auth cookie.
///
/// # Errors
///
/// Responds with:
/// - a 400 if the name is empty, the email is invalid or the password is too weak,
/// - a 409 if the email is already registered,
/// - a 500 if the password could not be hashed or the user could not be stored.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    ApiJson(user_data): ApiJson<RegisterForm>,
) -> Response {
    match create_user_from_form(&state, &user_data) {
        Ok(user) => match set_auth_cookie(jar, user.id, state.cookie_duration) {
            Ok(jar) => {
                tracing::info!("Registered user {}", user.id);
                (jar, Json(UserProfile::from(user))).into_response()
            }
            Err(error) => {
                tracing::error!("Error setting auth cookie for new user {}: {error}", user.id);
                error.into_response()
            }
        },
        Err(error) => {
            tracing::debug!("Registration failed: {error}");
            error.into_response()
        }
    }
}

fn create_user_from_form(
    state: &RegistrationState,
    user_data: &RegisterForm,
) -> Result<User, Error> {
    if user_data.name.trim().is_empty() {
        return Err(Error::EmptyUserName);
    }

    let email = Email::new(&user_data.email)?;
    let validated_password =
        ValidatedPassword::new(&user_data.password, &[user_data.name.as_str(), email.as_ref()])?;
    let password_hash = PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    create_user(&user_data.name, email, password_hash, &connection)
}

#[cfg(test)]
mod register_tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_extra::extract::cookie::Key;
    use axum_test::TestServer;
    use sha2::{Digest, Sha512};

    use crate::{
        auth::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION},
        test_utils::get_test_connection,
    };

    use super::{RegistrationState, register_user};

    fn get_test_server() -> TestServer {
        let state = RegistrationState {
            cookie_key: Key::from(&Sha512::digest(b"foobar")),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection: get_test_connection(),
        };
        let app = Router::new()
            .route("/users", post(register_user))
            .with_state(state);

        TestServer::new(app)
    }

    fn registration(email: &str, password: &str) -> serde_json::Value {
        serde_json::json!({
            "name": "Alice",
            "email": email,
            "password": password,
        })
    }

    #[tokio::test]
    async fn register_user_succeeds() {
        let server = get_test_server();

        let response = server
            .post("/users")
            .json(&registration("alice@example.com", "averysafeandsecurepassword"))
            .await;

        response.assert_status_ok();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["email"], "alice@example.com");
        assert!(body["id"].is_i64());
        response.cookie(COOKIE_TOKEN);
    }

    #[tokio::test]
    async fn register_user_fails_with_weak_password() {
        let server = get_test_server();

        let response = server
            .post("/users")
            .json(&registration("alice@example.com", "password"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.maybe_cookie(COOKIE_TOKEN).is_none());
    }

    #[tokio::test]
    async fn register_user_fails_with_invalid_email() {
        let server = get_test_server();

        let response = server
            .post("/users")
            .json(&registration("not-an-email", "averysafeandsecurepassword"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_user_fails_with_duplicate_email() {
        let server = get_test_server();
        server
            .post("/users")
            .json(&registration("alice@example.com", "averysafeandsecurepassword"))
            .await
            .assert_status_ok();

        let response = server
            .post("/users")
            .json(&registration("ALICE@example.com", "anothersafeandsecurepassword"))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }
}
