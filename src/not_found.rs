use axum::{
    http::{StatusCode, Uri},
    response::Response,
};

use crate::error::message_response;

/// The fallback handler for requests that do not match any route.
pub async fn get_404_not_found(uri: Uri) -> Response {
    tracing::debug!("No route for {uri}");

    message_response(StatusCode::NOT_FOUND, "Not found")
}
