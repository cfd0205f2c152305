//! Defines the transaction store trait.

use crate::{
    Error,
    transaction::{NewTransaction, Transaction, TransactionId},
    user::UserID,
};

/// Handles the persistence of transactions.
///
/// Every operation takes the ID of the user that owns the transactions. An
/// implementation must never return, count or delete a transaction that
/// belongs to a different user, no matter which transaction IDs it is given.
///
/// Each operation should be atomic.
pub trait TransactionStore {
    /// Create a new transaction owned by `owner`.
    ///
    /// The store assigns the ID and creation time.
    fn insert(&self, owner: UserID, new_transaction: NewTransaction)
    -> Result<Transaction, Error>;

    /// Retrieve all the transactions owned by `owner` in the order they were created.
    fn find(&self, owner: UserID) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transaction with `id` if it exists and is owned by `owner`.
    fn find_one(&self, owner: UserID, id: TransactionId) -> Result<Option<Transaction>, Error>;

    /// Delete the transaction with `id` if it exists and is owned by `owner`.
    ///
    /// Deleting a transaction that does not exist is not an error.
    fn delete_by_id(&self, owner: UserID, id: TransactionId) -> Result<(), Error>;

    /// Delete every transaction in `ids` that is owned by `owner`.
    ///
    /// IDs that do not exist or belong to another user are ignored.
    /// Returns the number of transactions that were deleted.
    fn delete_many(&self, owner: UserID, ids: &[TransactionId]) -> Result<usize, Error>;
}
