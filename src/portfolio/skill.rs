//! The skill model, database queries and listing endpoint.

use axum::{Json, extract::State};
use rusqlite::{Connection, Row};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{AppState, DatabaseId, Error};

/// A skill displayed on the portfolio site, e.g. "Rust - 85%".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    /// The ID of the skill.
    pub id: DatabaseId,
    /// The name of the skill.
    pub name: String,
    /// Proficiency from 0 to 100.
    pub level: i64,
    /// The group the skill is shown under, e.g. "Backend".
    pub category: String,
}

/// The data needed to create a new [Skill].
#[derive(Debug, Clone, PartialEq)]
pub struct NewSkill {
    /// The name of the skill.
    pub name: String,
    /// Proficiency from 0 to 100.
    pub level: i64,
    /// The group the skill is shown under.
    pub category: String,
}

/// Initialize the skill table.
pub fn create_skill_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS skill (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            level INTEGER NOT NULL,
            category TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create a skill and return it with its generated ID.
pub fn create_skill(new_skill: NewSkill, connection: &Connection) -> Result<Skill, Error> {
    connection.execute(
        "INSERT INTO skill (name, level, category, created_at) VALUES (?1, ?2, ?3, ?4)",
        (
            &new_skill.name,
            new_skill.level,
            &new_skill.category,
            OffsetDateTime::now_utc(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Skill {
        id,
        name: new_skill.name,
        level: new_skill.level,
        category: new_skill.category,
    })
}

/// Retrieve all skills in insertion order.
pub fn get_all_skills(connection: &Connection) -> Result<Vec<Skill>, Error> {
    connection
        .prepare("SELECT id, name, level, category FROM skill ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_skill| maybe_skill.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Skill, rusqlite::Error> {
    Ok(Skill {
        id: row.get(0)?,
        name: row.get(1)?,
        level: row.get(2)?,
        category: row.get(3)?,
    })
}

/// List all skills. An empty table produces an empty array, not an error.
pub async fn get_skills(State(state): State<AppState>) -> Result<Json<Vec<Skill>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(Json(get_all_skills(&connection)?))
}
