//! Cookie based identity: registering, logging in and out, and the middleware
//! that resolves each protected request to the [UserID](crate::UserID) making it.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod register_user;
mod token;

pub use cookie::DEFAULT_COOKIE_DURATION;
pub(crate) use cookie::{invalidate_auth_cookie, set_auth_cookie};
pub use log_in::post_log_in;
pub use log_out::post_log_out;
pub use middleware::auth_guard;
pub use register_user::register_user;

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub use middleware::AuthState;
