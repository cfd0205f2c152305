//! Log-out route handler that invalidates the authentication cookie.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::invalidate_auth_cookie, error::message_response};

/// Invalidate the auth cookie.
pub async fn post_log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_auth_cookie(jar);

    (jar, message_response(StatusCode::OK, "Logged out")).into_response()
}
