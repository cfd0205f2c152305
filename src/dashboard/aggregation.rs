//! Totals over a user's transactions for the summary cards.

use crate::transaction::{Transaction, TransactionType};

/// The money earned, the money spent and what is left over.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// Income minus expenses.
    pub balance: f64,
}

impl Totals {
    /// Sum `transactions` by type.
    ///
    /// Totals are always computed from the full list so that they can never
    /// drift out of sync with the transactions on display.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (income, expense) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), transaction| {
                    match transaction.kind {
                        TransactionType::Income => (income + transaction.amount, expense),
                        TransactionType::Expense => (income, expense + transaction.amount),
                    }
                });

        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::{
        dashboard::Totals,
        transaction::{Transaction, TransactionId, TransactionType},
        user::UserID,
    };

    fn transaction(id: i64, name: &str, amount: f64, kind: TransactionType) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            owner_id: UserID::new(1),
            name: name.to_owned(),
            amount,
            kind,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn no_transactions_gives_zero_totals() {
        assert_eq!(Totals::from_transactions(&[]), Totals::default());
    }

    #[test]
    fn salary_and_rent() {
        let transactions = [
            transaction(1, "Salary", 5000.0, TransactionType::Income),
            transaction(2, "Rent", 1200.0, TransactionType::Expense),
        ];

        let totals = Totals::from_transactions(&transactions);

        assert_eq!(
            totals,
            Totals {
                income: 5000.0,
                expense: 1200.0,
                balance: 3800.0,
            }
        );
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let transactions = [
            transaction(1, "Salary", 2500.5, TransactionType::Income),
            transaction(2, "Food", 20.25, TransactionType::Expense),
            transaction(3, "Gift", 100.0, TransactionType::Income),
            transaction(4, "Rent", 3000.0, TransactionType::Expense),
        ];

        let totals = Totals::from_transactions(&transactions);

        assert_eq!(totals.income, 2600.5);
        assert_eq!(totals.expense, 3020.25);
        assert_eq!(totals.balance, totals.income - totals.expense);
        assert!(totals.balance < 0.0);
    }
}
