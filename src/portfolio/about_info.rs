//! The about info singleton: model, database queries and endpoint.

use axum::{Json, extract::State};
use rusqlite::{Connection, OptionalExtension, Row};
use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;

use crate::{AppState, DatabaseId, Error};

/// The "about me" blurb and headline numbers shown on the portfolio site.
///
/// Only the most recently created active row is surfaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutInfo {
    /// The ID of the about info row.
    pub id: DatabaseId,
    /// The introduction paragraph.
    pub intro_text: String,
    /// Years of professional experience.
    pub years_experience: i64,
    /// Number of completed projects.
    pub projects_completed: i64,
    /// Client satisfaction as a percentage.
    pub client_satisfaction: i64,
    /// Whether this row is the one surfaced by the API.
    #[serde(skip)]
    pub is_active: bool,
}

/// The data needed to create a new [AboutInfo] row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAboutInfo {
    /// The introduction paragraph.
    pub intro_text: String,
    /// Years of professional experience.
    pub years_experience: i64,
    /// Number of completed projects.
    pub projects_completed: i64,
    /// Client satisfaction as a percentage.
    pub client_satisfaction: i64,
    /// Whether this row should be the one surfaced by the API.
    pub is_active: bool,
}

/// Initialize the about info table.
pub fn create_about_info_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS about_info (
            id INTEGER PRIMARY KEY,
            intro_text TEXT NOT NULL,
            years_experience INTEGER NOT NULL DEFAULT 3,
            projects_completed INTEGER NOT NULL DEFAULT 50,
            client_satisfaction INTEGER NOT NULL DEFAULT 100,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create an about info row and return it with its generated ID.
pub fn create_about_info(
    new_about_info: NewAboutInfo,
    connection: &Connection,
) -> Result<AboutInfo, Error> {
    connection.execute(
        "INSERT INTO about_info
            (intro_text, years_experience, projects_completed, client_satisfaction, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            &new_about_info.intro_text,
            new_about_info.years_experience,
            new_about_info.projects_completed,
            new_about_info.client_satisfaction,
            new_about_info.is_active,
            OffsetDateTime::now_utc(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(AboutInfo {
        id,
        intro_text: new_about_info.intro_text,
        years_experience: new_about_info.years_experience,
        projects_completed: new_about_info.projects_completed,
        client_satisfaction: new_about_info.client_satisfaction,
        is_active: new_about_info.is_active,
    })
}

/// Retrieve the most recently created active about info row, if any.
pub fn get_active_about_info(connection: &Connection) -> Result<Option<AboutInfo>, Error> {
    connection
        .prepare(
            "SELECT id, intro_text, years_experience, projects_completed, client_satisfaction, is_active
             FROM about_info
             WHERE is_active = 1
             ORDER BY created_at DESC
             LIMIT 1;",
        )?
        .query_row([], map_row)
        .optional()
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<AboutInfo, rusqlite::Error> {
    Ok(AboutInfo {
        id: row.get(0)?,
        intro_text: row.get(1)?,
        years_experience: row.get(2)?,
        projects_completed: row.get(3)?,
        client_satisfaction: row.get(4)?,
        is_active: row.get(5)?,
    })
}

/// Get the active about info, or an empty object if none exists.
pub async fn get_about_info(State(state): State<AppState>) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match get_active_about_info(&connection)? {
        Some(about_info) => Ok(Json(
            serde_json::to_value(about_info)
                .map_err(|error| Error::JsonSerializationError(error.to_string()))?,
        )),
        None => Ok(Json(json!({}))),
    }
}
