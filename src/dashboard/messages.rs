//! The messages shown in the dashboard's error banner.

/// Shown when the transactions could not be loaded.
pub const FETCH_FAILED: &str = "Failed to fetch transactions. Please try again later.";
/// Shown when the amount entered for a new transaction is not a positive number.
pub const INVALID_AMOUNT: &str = "Amount must be a positive number.";
/// Shown when no name was entered for a new transaction.
pub const MISSING_NAME: &str = "Transaction name is required.";
/// Shown when the server did not accept a new transaction.
pub const ADD_FAILED: &str = "Failed to add transaction. Please try again.";
/// Shown when a single transaction could not be deleted.
pub const DELETE_FAILED: &str = "Failed to delete transaction. Please try again.";
/// Shown when the selected transactions could not be deleted.
pub const DELETE_MANY_FAILED: &str = "Failed to delete transactions. Please try again.";
