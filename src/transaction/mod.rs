//! Finance transactions: the data model, database queries and the listing
//! endpoint.

mod core;
mod list_endpoint;

pub use core::{
    NewTransaction, Transaction, TransactionType, create_transaction, create_transaction_table,
    get_recent_transactions, get_transactions_since, sum_by_type, sum_expenses_by_category,
};
pub use list_endpoint::{MAX_LISTED_TRANSACTIONS, TransactionView, get_transactions};

pub(crate) use core::round_cents;
