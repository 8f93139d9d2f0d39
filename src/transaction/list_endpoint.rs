//! The endpoint for listing recent transactions.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    AppState, DatabaseId, Error,
    transaction::{Transaction, TransactionType, core::round_cents, get_recent_transactions},
};

/// The maximum number of transactions returned by the listing endpoint.
pub const MAX_LISTED_TRANSACTIONS: u32 = 50;

/// The wire format for a transaction in the listing endpoint.
///
/// The amount is signed: positive for income, negative for expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The signed transaction amount, rounded to cents.
    pub amount: f64,
    /// The category the transaction belongs to.
    pub category: String,
    /// The transaction date as an ISO-8601 string, e.g. "2024-01-15".
    pub date: String,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl From<Transaction> for TransactionView {
    fn from(transaction: Transaction) -> Self {
        let signed_amount = match transaction.transaction_type {
            TransactionType::Income => transaction.amount,
            TransactionType::Expense => -transaction.amount,
        };

        Self {
            id: transaction.id,
            description: transaction.description,
            amount: round_cents(signed_amount),
            category: transaction.category,
            date: transaction.date.to_string(),
            transaction_type: transaction.transaction_type,
        }
    }
}

/// List the most recent transactions, capped at [MAX_LISTED_TRANSACTIONS].
///
/// An empty table produces an empty array with status 200. Store failures
/// surface as a 500 error envelope, they are not masked with placeholder data.
pub async fn get_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionView>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_recent_transactions(MAX_LISTED_TRANSACTIONS, &connection)?;

    Ok(Json(
        transactions.into_iter().map(TransactionView::from).collect(),
    ))
}

#[cfg(test)]
mod list_endpoint_tests {
    use axum::{Json, extract::State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState,
        transaction::{NewTransaction, TransactionType, create_transaction},
    };

    use super::get_transactions;

    fn get_test_app_state() -> AppState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");

        AppState::new(connection).expect("Could not initialize database")
    }

    fn insert_transaction(
        state: &AppState,
        description: &str,
        amount: f64,
        category: &str,
        date: time::Date,
        transaction_type: TransactionType,
    ) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            NewTransaction {
                description: description.to_owned(),
                amount,
                category: category.to_owned(),
                date,
                transaction_type,
            },
            &connection,
        )
        .expect("Could not create test transaction");
    }

    #[tokio::test]
    async fn listing_signs_amounts_by_type() {
        let state = get_test_app_state();
        insert_transaction(
            &state,
            "Salary",
            3500.0,
            "Income",
            date!(2024 - 01 - 01),
            TransactionType::Income,
        );
        insert_transaction(
            &state,
            "Groceries",
            85.5,
            "Food",
            date!(2024 - 01 - 15),
            TransactionType::Expense,
        );

        let Json(views) = get_transactions(State(state)).await.unwrap();

        for view in views {
            match view.transaction_type {
                TransactionType::Income => assert!(view.amount > 0.0),
                TransactionType::Expense => assert!(view.amount < 0.0),
            }
        }
    }

    #[tokio::test]
    async fn listing_formats_dates_as_iso_8601() {
        let state = get_test_app_state();
        insert_transaction(
            &state,
            "Groceries",
            85.5,
            "Food",
            date!(2024 - 01 - 15),
            TransactionType::Expense,
        );

        let Json(views) = get_transactions(State(state)).await.unwrap();

        assert_eq!(views[0].date, "2024-01-15");
    }

    #[tokio::test]
    async fn listing_returns_empty_array_for_empty_table() {
        let state = get_test_app_state();

        let Json(views) = get_transactions(State(state)).await.unwrap();

        assert_eq!(views, vec![]);
    }

    #[tokio::test]
    async fn repeated_listing_returns_identical_payloads() {
        let state = get_test_app_state();
        insert_transaction(
            &state,
            "Gas",
            45.2,
            "Transportation",
            date!(2024 - 01 - 12),
            TransactionType::Expense,
        );

        let Json(first) = get_transactions(State(state.clone())).await.unwrap();
        let Json(second) = get_transactions(State(state)).await.unwrap();

        assert_eq!(first, second);
    }
}
