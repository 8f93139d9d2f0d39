//! Defines the core data model and database queries for finance transactions.

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, database_id::DatabaseId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or sent money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The string stored in the database for this transaction type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type {other:?}").into(),
            )),
        }
    }
}

/// An event where money was either spent or earned.
///
/// The amount is stored as an unsigned magnitude, the sign is applied at
/// presentation time based on [TransactionType].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, always non-negative.
    pub amount: f64,
    /// The category the transaction belongs to, e.g. "Food".
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
}

/// The data needed to create a new [Transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, always non-negative.
    pub amount: f64,
    /// The category the transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Initialize the finance transaction table.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS finance_transaction (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL,
            transaction_type TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_type
            ON finance_transaction(transaction_type);",
    )?;

    Ok(())
}

/// Create a transaction and return it with its generated ID.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO finance_transaction
            (description, amount, category, date, transaction_type, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            &new_transaction.description,
            new_transaction.amount,
            &new_transaction.category,
            new_transaction.date,
            new_transaction.transaction_type,
            now,
            now,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        description: new_transaction.description,
        amount: new_transaction.amount,
        category: new_transaction.category,
        date: new_transaction.date,
        transaction_type: new_transaction.transaction_type,
    })
}

/// Retrieve the most recent transactions, newest first by (date, created_at),
/// truncated to `limit`.
///
/// An empty table produces an empty Vec, not an error.
pub fn get_recent_transactions(
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, category, date, transaction_type
             FROM finance_transaction
             ORDER BY date DESC, created_at DESC
             LIMIT :limit;",
        )?
        .query_map(&[(":limit", &limit)], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Retrieve all transactions dated on or after `start`, oldest first.
pub fn get_transactions_since(
    start: Date,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, category, date, transaction_type
             FROM finance_transaction
             WHERE date >= :start
             ORDER BY date ASC;",
        )?
        .query_map(&[(":start", &start)], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Sum the amounts of all transactions of `transaction_type`.
///
/// Returns zero when no rows match.
pub fn sum_by_type(
    transaction_type: TransactionType,
    connection: &Connection,
) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM finance_transaction
             WHERE transaction_type = :transaction_type;",
            &[(":transaction_type", &transaction_type)],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Sum expense amounts per category, ordered by the summed amount descending.
///
/// Returns an empty Vec when there are no expenses.
pub fn sum_expenses_by_category(connection: &Connection) -> Result<Vec<(String, f64)>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(amount) AS total FROM finance_transaction
             WHERE transaction_type = 'expense'
             GROUP BY category
             ORDER BY total DESC;",
        )?
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .map(|maybe_pair| maybe_pair.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
        transaction_type: row.get(5)?,
    })
}

/// Round a monetary value to two decimal places for presentation.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
