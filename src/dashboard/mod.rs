//! The dashboard shows a user's transactions along with their total income, expenses and balance.
//!
//! - [Dashboard] holds the client-side state and changes only in response to request outcomes.
//! - [DashboardSession] makes the requests through a [TransactionApi] and applies their outcomes.
//! - [dashboard_view] and [render] display the state as HTML and text respectively.

mod aggregation;
mod api;
mod command;
pub mod messages;
mod page;
mod session;
mod state;
mod text;
mod view;

pub use aggregation::Totals;
pub use api::{ApiError, HttpTransactionApi, TransactionApi};
pub use command::{Command, CommandError, HELP_TEXT};
pub use page::get_dashboard_page;
pub use session::DashboardSession;
pub use state::Dashboard;
pub use text::render;
pub use view::dashboard_view;
