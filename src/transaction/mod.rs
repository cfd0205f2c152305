//! Transaction management for the budget tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated `NewTransaction` used to create one
//! - The owner-scoped `TransactionStore` trait and its SQLite implementation
//! - The `TransactionService` used by the route handlers
//! - The JSON route handlers for creating, listing and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod delete_many_endpoint;
mod list_endpoint;
mod service;
mod sqlite_store;
mod store;

pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionType, create_transaction_table,
};
pub use create_endpoint::{CreateTransactionRequest, create_transaction_endpoint};
pub use delete_endpoint::delete_transaction_endpoint;
pub use delete_many_endpoint::{DeleteManyRequest, delete_many_transactions_endpoint};
pub use list_endpoint::list_transactions_endpoint;
pub use service::{TransactionService, TransactionState};
pub use sqlite_store::SQLiteTransactionStore;
pub use store::TransactionStore;
