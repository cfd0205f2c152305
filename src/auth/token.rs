//! The token stored in the auth cookie.
//!
//! A token says which user made a request and until when that is trusted.
//! It is encoded as JSON with an RFC 3339 expiry and only ever travels inside
//! the private (encrypted) cookie, so it does not need to be signed itself.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::UserID};

/// Identifies the user making a request and when that identification stops being valid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub user_id: UserID,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl Token {
    /// A token for `user_id` that expires `duration` after `now`.
    ///
    /// # Errors
    /// Returns [Error::InvalidDateFormat] if the expiry is not a representable date.
    pub fn issue(user_id: UserID, now: OffsetDateTime, duration: Duration) -> Result<Self, Error> {
        let expires_at = now
            .checked_add(duration)
            .ok_or_else(|| Error::InvalidDateFormat(format!("cannot add {duration} to {now}")))?;

        Ok(Self {
            user_id,
            expires_at,
        })
    }

    /// Whether the token is no longer valid at `now`.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }

    /// A copy of this token that lasts until at least `duration` after `now`.
    ///
    /// Returns `None` if this token already lasts that long, tokens are never shortened.
    ///
    /// # Errors
    /// Returns [Error::InvalidDateFormat] if the new expiry is not a representable date.
    pub fn renewed(&self, now: OffsetDateTime, duration: Duration) -> Result<Option<Self>, Error> {
        let renewed = Self::issue(self.user_id, now, duration)?;

        Ok((renewed.expires_at > self.expires_at).then_some(renewed))
    }

    /// The cookie value for this token.
    ///
    /// # Errors
    /// Returns [Error::InvalidDateFormat] if the expiry cannot be written as RFC 3339,
    /// e.g. a year past 9999.
    pub fn encode(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|error| Error::InvalidDateFormat(error.to_string()))
    }

    /// Read a token from a cookie value.
    ///
    /// # Errors
    /// Returns [Error::InvalidToken] if `value` is not an encoded token.
    pub fn decode(value: &str) -> Result<Self, Error> {
        serde_json::from_str(value).map_err(|error| Error::InvalidToken(error.to_string()))
    }
}
