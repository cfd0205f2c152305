//! The requests the dashboard makes to the transaction API.

use std::{future::Future, sync::Mutex};

use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{COOKIE, SET_COOKIE},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    endpoints::{self, format_endpoint},
    transaction::{
        CreateTransactionRequest, DeleteManyRequest, NewTransaction, Transaction, TransactionId,
    },
    user::UserProfile,
};

/// The ways a request to the transaction API can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server has no such resource for the current user.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request had no valid auth cookie or the credentials were wrong.
    #[error("not authenticated: {0}")]
    Unauthorized(String),

    /// The server responded with any other unsuccessful status code.
    #[error("request failed with status {0}: {1}")]
    Status(u16, String),

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// The transaction operations available to the dashboard.
///
/// Every operation acts on the transactions of whichever user the
/// implementation is authenticated as.
pub trait TransactionApi {
    /// Fetch all of the user's transactions.
    fn list(&self) -> impl Future<Output = Result<Vec<Transaction>, ApiError>> + Send;

    /// Create a transaction and get back the stored record.
    fn create(
        &self,
        new_transaction: &NewTransaction,
    ) -> impl Future<Output = Result<Transaction, ApiError>> + Send;

    /// Delete a single transaction.
    fn delete(&self, id: TransactionId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete several transactions in one request.
    fn delete_many(
        &self,
        ids: &[TransactionId],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Deserialize)]
struct MessageBody {
    msg: String,
}

/// Talks to a budget tracker server over HTTP and keeps the auth cookie between requests.
#[derive(Debug)]
pub struct HttpTransactionApi {
    client: Client,
    base_url: String,
    auth_cookie: Mutex<Option<String>>,
}

impl HttpTransactionApi {
    /// Create a client for the server at `base_url`, e.g. "http://localhost:3000".
    ///
    /// The client is not authenticated until [Self::register] or [Self::log_in] succeeds.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_cookie: Mutex::new(None),
        }
    }

    /// Create a new account and authenticate as it.
    ///
    /// # Errors
    /// Returns an [ApiError::Status] with the server's message if the details
    /// were rejected, e.g. because the password is too weak.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ApiError> {
        let response = self
            .request(self.client.post(self.url(endpoints::USERS)))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;

        Ok(self.check(response).await?.json().await?)
    }

    /// Authenticate as an existing user.
    ///
    /// # Errors
    /// Returns an [ApiError::Unauthorized] if the email or password is wrong.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .request(self.client.post(self.url(endpoints::LOG_IN_API)))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Ok(self.check(response).await?.json().await?)
    }

    /// Whether a log in or registration has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.auth_cookie
            .lock()
            .map(|cookie| cookie.is_some())
            .unwrap_or(false)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let cookie = self
            .auth_cookie
            .lock()
            .ok()
            .and_then(|cookie| cookie.clone());

        match cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Remember the latest auth cookie and turn unsuccessful responses into errors.
    ///
    /// The cookie is handled here rather than with a cookie store because the
    /// server marks it as secure, and a cookie store would not send it back
    /// over plain HTTP.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        self.store_auth_cookie(&response);

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<MessageBody>(&text)
            .map(|body| body.msg)
            .unwrap_or(text);

        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
            status => ApiError::Status(status.as_u16(), message),
        })
    }

    fn store_auth_cookie(&self, response: &Response) {
        let Some(cookie) = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .find(|pair| pair.trim_start().starts_with("auth_token="))
        else {
            return;
        };

        match self.auth_cookie.lock() {
            Ok(mut auth_cookie) => *auth_cookie = Some(cookie.trim().to_owned()),
            Err(error) => tracing::error!("Could not store auth cookie: {error}"),
        }
    }
}

impl TransactionApi for HttpTransactionApi {
    async fn list(&self) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .request(self.client.get(self.url(endpoints::TRANSACTIONS_API)))
            .send()
            .await?;

        Ok(self.check(response).await?.json().await?)
    }

    async fn create(&self, new_transaction: &NewTransaction) -> Result<Transaction, ApiError> {
        let body = CreateTransactionRequest {
            name: new_transaction.name().to_owned(),
            amount: new_transaction.amount(),
            kind: new_transaction.kind(),
        };
        let response = self
            .request(self.client.post(self.url(endpoints::TRANSACTIONS_API)))
            .json(&body)
            .send()
            .await?;

        Ok(self.check(response).await?.json().await?)
    }

    async fn delete(&self, id: TransactionId) -> Result<(), ApiError> {
        let url = self.url(&format_endpoint(endpoints::TRANSACTION, id));
        let response = self.request(self.client.delete(url)).send().await?;

        self.check(response).await?;

        Ok(())
    }

    async fn delete_many(&self, ids: &[TransactionId]) -> Result<(), ApiError> {
        let body = DeleteManyRequest { ids: ids.to_vec() };
        let response = self
            .request(self.client.post(self.url(endpoints::DELETE_TRANSACTIONS)))
            .json(&body)
            .send()
            .await?;

        self.check(response).await?;

        Ok(())
    }
}
