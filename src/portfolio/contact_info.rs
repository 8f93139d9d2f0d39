//! The contact info singleton: model, database queries and endpoint.

use axum::{Json, extract::State};
use rusqlite::{Connection, OptionalExtension, Row};
use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;

use crate::{AppState, DatabaseId, Error};

/// The contact details shown on the portfolio site.
///
/// Only the most recently created active row is surfaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactInfo {
    /// The ID of the contact info row.
    pub id: DatabaseId,
    /// The contact email address.
    pub email: String,
    /// The contact phone number.
    pub phone: String,
    /// Where the site owner is based, e.g. "Wellington, New Zealand".
    pub location: String,
    /// Whether this row is the one surfaced by the API.
    #[serde(skip)]
    pub is_active: bool,
}

/// The data needed to create a new [ContactInfo] row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContactInfo {
    /// The contact email address.
    pub email: String,
    /// The contact phone number.
    pub phone: String,
    /// Where the site owner is based.
    pub location: String,
    /// Whether this row should be the one surfaced by the API.
    pub is_active: bool,
}

/// Initialize the contact info table.
pub fn create_contact_info_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS contact_info (
            id INTEGER PRIMARY KEY,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            location TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create a contact info row and return it with its generated ID.
pub fn create_contact_info(
    new_contact_info: NewContactInfo,
    connection: &Connection,
) -> Result<ContactInfo, Error> {
    connection.execute(
        "INSERT INTO contact_info (email, phone, location, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &new_contact_info.email,
            &new_contact_info.phone,
            &new_contact_info.location,
            new_contact_info.is_active,
            OffsetDateTime::now_utc(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(ContactInfo {
        id,
        email: new_contact_info.email,
        phone: new_contact_info.phone,
        location: new_contact_info.location,
        is_active: new_contact_info.is_active,
    })
}

/// Retrieve the most recently created active contact info row, if any.
pub fn get_active_contact_info(connection: &Connection) -> Result<Option<ContactInfo>, Error> {
    connection
        .prepare(
            "SELECT id, email, phone, location, is_active FROM contact_info
             WHERE is_active = 1
             ORDER BY created_at DESC
             LIMIT 1;",
        )?
        .query_row([], map_row)
        .optional()
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<ContactInfo, rusqlite::Error> {
    Ok(ContactInfo {
        id: row.get(0)?,
        email: row.get(1)?,
        phone: row.get(2)?,
        location: row.get(3)?,
        is_active: row.get(4)?,
    })
}

/// Get the active contact info, or an empty object if none exists.
///
/// A missing row is not an error for this endpoint, the frontend treats an
/// empty object as "nothing to show".
pub async fn get_contact_info(State(state): State<AppState>) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match get_active_contact_info(&connection)? {
        Some(contact_info) => Ok(Json(
            serde_json::to_value(contact_info)
                .map_err(|error| Error::JsonSerializationError(error.to_string()))?,
        )),
        None => Ok(Json(json!({}))),
    }
}
