//! Database schema initialization.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    portfolio::{
        create_about_info_table, create_contact_info_table, create_contact_message_table,
        create_experience_table, create_project_table, create_skill_table,
    },
    transaction::create_transaction_table,
};

/// Create the tables for all domain models.
///
/// Safe to call on an existing database, each table is only created if it does
/// not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;
    create_skill_table(&transaction)?;
    create_experience_table(&transaction)?;
    create_project_table(&transaction)?;
    create_contact_info_table(&transaction)?;
    create_contact_message_table(&transaction)?;
    create_about_info_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
                ('finance_transaction', 'skill', 'experience', 'project',
                 'contact_info', 'contact_message', 'about_info')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 7);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");
        initialize(&connection).expect("Second initialize should not fail");
    }
}
